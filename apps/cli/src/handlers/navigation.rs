use resbook::domain::RouteRequirement;
use resbook::identity::guard::{decide, notice};
use resbook::identity::{AuthState, RouteTable};

fn requirement_name(requirement: RouteRequirement) -> &'static str {
    match (requirement.requires_auth(), requirement.requires_audit()) {
        (false, _) => "public",
        (true, false) => "auth",
        (true, true) => "audited",
    }
}

pub(crate) fn guard(path: &str, state: AuthState) {
    let routes = RouteTable::standard();
    let path = routes.canonical(path);
    let resolved = routes.resolve(&path);
    let outcome = decide(resolved.requirement(), state, &path);

    println!("route: {} ({})", resolved.path, resolved.title().unwrap_or("-"));
    println!("requirement: {}", requirement_name(resolved.requirement()));
    println!("state: {state}");
    match outcome.target() {
        None => println!("outcome: allow"),
        Some(target) => println!("outcome: redirect {target}"),
    }
    if let Some(text) = notice(state, &outcome) {
        println!("notice: {text}");
    }
}

pub(crate) fn routes() {
    for route in RouteTable::standard().routes() {
        println!("{:<28} {:<8} {}", route.pattern, requirement_name(route.requirement), route.title);
    }
}
