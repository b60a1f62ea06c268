//! The client's page table: path patterns, titles and their access requirements.

use resbook_domain::RouteRequirement;
use resbook_domain::constants::{
    ROUTE_AUDIT_STATUS, ROUTE_HOME, ROUTE_LOGIN, ROUTE_MY, ROUTE_ROOT,
};

/// One page of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Pattern with `:name` segments, e.g. `/orders/:type/:id`.
    pub pattern: &'static str,
    pub title: &'static str,
    pub requirement: RouteRequirement,
}

impl Route {
    const fn new(pattern: &'static str, title: &'static str, requirement: RouteRequirement) -> Self {
        Self { pattern, title, requirement }
    }

    fn captures<'a>(&self, path: &'a str) -> Option<Vec<(&'static str, &'a str)>> {
        let mut expected = segments(self.pattern);
        let mut actual = segments(path);
        let mut params = Vec::new();
        loop {
            match (expected.next(), actual.next()) {
                (None, None) => return Some(params),
                (Some(pattern), Some(value)) => {
                    if let Some(name) = pattern.strip_prefix(':') {
                        params.push((name, value));
                    } else if pattern != value {
                        return None;
                    }
                },
                _ => return None,
            }
        }
    }
}

/// A route matched against a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// `None` when no page matches; such paths are treated as public.
    pub route: Option<&'a Route>,
    /// The requested path without query or fragment.
    pub path: String,
    pub params: Vec<(&'static str, String)>,
}

impl Resolved<'_> {
    #[must_use]
    pub fn requirement(&self) -> RouteRequirement {
        self.route.map_or(RouteRequirement::PUBLIC, |r| r.requirement)
    }

    #[must_use]
    pub fn title(&self) -> Option<&'static str> {
        self.route.map(|r| r.title)
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    redirects: Vec<(&'static str, &'static str)>,
}

impl RouteTable {
    /// The pages of the booking client.
    #[must_use]
    pub fn standard() -> Self {
        const PUBLIC: RouteRequirement = RouteRequirement::PUBLIC;
        const AUTH: RouteRequirement = RouteRequirement::AUTH;
        const AUDITED: RouteRequirement = RouteRequirement::AUDITED;

        Self {
            routes: vec![
                Route::new(ROUTE_HOME, "首页", PUBLIC),
                Route::new("/about", "公司概况", PUBLIC),
                Route::new("/services", "服务中心", PUBLIC),
                Route::new("/services/equipment", "设备租赁", AUDITED),
                Route::new("/services/equipment/:id", "设备详情", PUBLIC),
                Route::new("/services/cage", "笼位租赁", AUDITED),
                Route::new("/services/experiment", "实验代操作", AUDITED),
                Route::new("/services/animal", "动物订购", AUDITED),
                Route::new("/services/reagent", "试剂耗材订购", AUDITED),
                Route::new("/cases", "案例展示", PUBLIC),
                Route::new("/cases/:id", "案例详情", PUBLIC),
                Route::new(ROUTE_MY, "个人中心", AUTH),
                Route::new(ROUTE_LOGIN, "登录", PUBLIC),
                Route::new("/register", "注册", PUBLIC),
                Route::new(ROUTE_AUDIT_STATUS, "审核状态", AUTH),
                Route::new("/orders", "我的订单", AUTH),
                Route::new("/orders/:type/:id", "订单详情", AUTH),
            ],
            redirects: vec![(ROUTE_ROOT, ROUTE_HOME)],
        }
    }

    /// An empty table: every path is public.
    #[must_use]
    pub const fn empty() -> Self {
        Self { routes: Vec::new(), redirects: Vec::new() }
    }

    #[must_use]
    pub fn with_route(
        mut self,
        pattern: &'static str,
        title: &'static str,
        requirement: RouteRequirement,
    ) -> Self {
        self.routes.push(Route::new(pattern, title, requirement));
        self
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Follows static redirects (`/` to `/home`); the query string is kept.
    #[must_use]
    pub fn canonical(&self, full_path: &str) -> String {
        let (path, rest) = split_path(full_path);
        let normalized = normalize(path);
        self.redirects
            .iter()
            .find(|(from, _)| *from == normalized)
            .map_or_else(|| full_path.to_owned(), |(_, to)| format!("{to}{rest}"))
    }

    /// Matches `full_path` (query and fragment ignored) against the table. The first matching
    /// pattern wins.
    #[must_use]
    pub fn resolve(&self, full_path: &str) -> Resolved<'_> {
        let (path, _) = split_path(full_path);
        let path = normalize(path);
        for route in &self.routes {
            if let Some(params) = route.captures(&path) {
                let params = params.into_iter().map(|(k, v)| (k, v.to_owned())).collect();
                return Resolved { route: Some(route), path, params };
            }
        }
        Resolved { route: None, path, params: Vec::new() }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn split_path(full: &str) -> (&str, &str) {
    full.find(['?', '#']).map_or((full, ""), |at| full.split_at(at))
}

fn normalize(path: &str) -> String {
    let joined = segments(path).collect::<Vec<_>>().join("/");
    format!("/{joined}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_static_and_parameterized_routes() {
        let table = RouteTable::standard();

        let cage = table.resolve("/services/cage?room=1#top");
        assert_eq!(cage.title(), Some("笼位租赁"));
        assert_eq!(cage.requirement(), RouteRequirement::AUDITED);
        assert_eq!(cage.path, "/services/cage");

        let detail = table.resolve("/services/equipment/17");
        assert_eq!(detail.title(), Some("设备详情"));
        assert_eq!(detail.requirement(), RouteRequirement::PUBLIC);
        assert_eq!(detail.param("id"), Some("17"));

        let order = table.resolve("/orders/cage/9/");
        assert_eq!(order.requirement(), RouteRequirement::AUTH);
        assert_eq!(order.param("type"), Some("cage"));
        assert_eq!(order.param("id"), Some("9"));
    }

    #[test]
    fn unknown_paths_are_public() {
        let table = RouteTable::standard();
        let resolved = table.resolve("/nowhere/at/all");
        assert!(resolved.route.is_none());
        assert_eq!(resolved.requirement(), RouteRequirement::PUBLIC);
    }

    #[test]
    fn root_redirects_home() {
        let table = RouteTable::standard();
        assert_eq!(table.canonical("/"), "/home");
        assert_eq!(table.canonical("/?from=share"), "/home?from=share");
        assert_eq!(table.canonical("/my"), "/my");
    }
}
