use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary isolated from any config file or session of the developer's machine.
fn resbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("resbook").unwrap();
    cmd.current_dir(dir.path())
        .env("RESBOOK__STORAGE__DIR", dir.path().join("state"))
        .env("RESBOOK__LOGGING__CONSOLE", "false");
    cmd
}

#[test]
fn without_arguments_prints_help() {
    let dir = TempDir::new().unwrap();
    resbook(&dir).assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn slots_group_prints_dates_in_order() {
    let dir = TempDir::new().unwrap();
    resbook(&dir)
        .args(["slots", "group", "2026-01-11 09:00-10:00", "2026-01-10 14:00-15:00", "bad"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r#"(?s)"2026-01-10".*"14:00-15:00".*"2026-01-11""#).unwrap())
        .stdout(predicate::str::contains("bad").not());
}

#[test]
fn slots_flatten_accepts_described_entries() {
    let dir = TempDir::new().unwrap();
    resbook(&dir)
        .args([
            "slots",
            "flatten",
            r#"{"2026-01-11": ["09:00-10:00"], "2026-01-10": [{"display_time": "08:00-09:00"}]}"#,
        ])
        .assert()
        .success()
        .stdout("2026-01-10 08:00-09:00\n2026-01-11 09:00-10:00\n");
}

#[test]
fn slots_confirm_and_range() {
    let dir = TempDir::new().unwrap();
    let slots = ["2026-01-10 09:00-10:00", "2026-01-10 10:00-11:00", "2026-01-12 09:00-10:00"];

    resbook(&dir)
        .args(["slots", "confirm"])
        .args(slots)
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-01-10\n  09:00-10:00\n  10:00-11:00\n\n2026-01-12"))
        .stdout(predicate::str::contains("共 2 天，3 个时间段"));

    resbook(&dir)
        .args(["slots", "range"])
        .args(slots)
        .assert()
        .success()
        .stdout("2026-01-10 等2天\n");

    resbook(&dir).args(["slots", "display"]).assert().success().stdout("-\n");
}

#[test]
fn period_is_described() {
    let dir = TempDir::new().unwrap();
    resbook(&dir)
        .args(["period", "2026-01-10", "2026-01-12"])
        .assert()
        .success()
        .stdout("2026-01-10 - 2026-01-12 (3天)\n3天\n");

    resbook(&dir)
        .args(["period", "2026-01-10"])
        .assert()
        .success()
        .stdout("2026-01-10 至 长期\n长期预约\n");

    resbook(&dir)
        .args(["period", "2026-01-12", "2026-01-10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("before start date"));
}

#[test]
fn window_uses_configured_advance_days() {
    let dir = TempDir::new().unwrap();
    resbook(&dir)
        .env("RESBOOK__BOOKING__CAGE_ADVANCE_DAYS", "3")
        .args(["window", "cage", "--today", "2026-01-10"])
        .assert()
        .success()
        .stdout("cage: 2026-01-10 - 2026-01-13 (4天)\n");
}

#[test]
fn guard_reports_redirects_and_notices() {
    let dir = TempDir::new().unwrap();
    resbook(&dir)
        .args(["guard", "/services/cage", "--state", "pending-audit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("requirement: audited"))
        .stdout(predicate::str::contains("outcome: redirect /audit-status"))
        .stdout(predicate::str::contains("notice: 账号审核中，请等待审核通过"));

    resbook(&dir)
        .args(["guard", "/orders/cage/3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outcome: redirect /login?redirect=/orders/cage/3"));

    resbook(&dir)
        .args(["guard", "/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("route: /home (首页)"))
        .stdout(predicate::str::contains("outcome: allow"));
}

#[test]
fn session_status_reads_the_persisted_pair() {
    let dir = TempDir::new().unwrap();
    resbook(&dir).args(["session", "status"]).assert().success().stdout("state: anonymous\n");

    let state = dir.path().join("state");
    std::fs::create_dir_all(&state).unwrap();
    let document = serde_json::json!({
        "resbook_token": "tkn",
        "resbook_user": r#"{"name": "张三", "audit_status": 2}"#,
    });
    std::fs::write(state.join("session.json"), document.to_string()).unwrap();

    resbook(&dir)
        .args(["session", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("state: rejected"))
        .stdout(predicate::str::contains("name: 张三"))
        .stdout(predicate::str::contains("audit: 审核拒绝"));
}

#[test]
fn login_rejects_a_malformed_phone_before_any_request() {
    let dir = TempDir::new().unwrap();
    resbook(&dir)
        .args(["login", "12345", "123456"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("请输入正确的手机号"));
}
