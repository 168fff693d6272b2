//! Route table construction and dispatch.
//!
//! # Responsibilities
//! - Hold the ordered list of routes declared at startup
//! - Resolve an incoming path to a view or an explicit NotFound
//! - Reverse route names (optionally namespace-qualified) back to paths
//!
//! # Design Decisions
//! - Entries are scanned in declaration order; the first match wins and
//!   control transfers to its target
//! - A matched include commits: a miss inside the sub-table is a final
//!   NotFound, later top-level entries are not consulted
//! - Includes hold an `Arc` to an independently owned sub-table
//! - Namespaced route names are addressed as `ns:name`; a namespace hides
//!   the bare names of its sub-table

use std::sync::Arc;

use crate::routing::handler::{PathParams, View};
use crate::routing::pattern::{Pattern, PatternError, ReverseError};

/// The one failure mode intrinsic to dispatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("no route matched the request path")]
    NotFound,
}

enum RouteTarget {
    View(Arc<dyn View>),
    Include {
        table: Arc<RouteTable>,
        namespace: Option<String>,
    },
}

struct Route {
    pattern: Pattern,
    target: RouteTarget,
    name: Option<String>,
}

/// Outcome of a successful dispatch.
pub struct ResolvedRoute {
    /// The view to invoke.
    pub view: Arc<dyn View>,
    /// Parameters captured along the whole match, outermost first.
    pub params: PathParams,
    /// Fully qualified route name (`ns:name`), when the route is named.
    pub name: Option<String>,
}

impl std::fmt::Debug for ResolvedRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("params", &self.params)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A named route as listed by introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedRoute {
    /// Fully qualified name, e.g. `api:workout-detail`.
    pub name: String,
    /// Absolute pattern path, e.g. `/api/workouts/{id}/`.
    pub path: String,
}

/// An ordered, immutable table of routes.
///
/// Built once at startup; read concurrently by every in-flight request
/// without locking.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a view route. The pattern must consume the entire remaining
    /// path for the route to match.
    pub fn view(
        mut self,
        pattern: &str,
        name: Option<&str>,
        view: Arc<dyn View>,
    ) -> Result<Self, PatternError> {
        self.routes.push(Route {
            pattern: Pattern::parse(pattern)?,
            target: RouteTarget::View(view),
            name: name.map(str::to_string),
        });
        Ok(self)
    }

    /// Append an include route. The pattern matches as a prefix; the
    /// remainder is dispatched by the included sub-table.
    pub fn include(
        mut self,
        pattern: &str,
        namespace: Option<&str>,
        table: RouteTable,
    ) -> Result<Self, PatternError> {
        self.routes.push(Route {
            pattern: Pattern::parse(pattern)?,
            target: RouteTarget::Include {
                table: Arc::new(table),
                namespace: namespace.map(str::to_string),
            },
            name: None,
        });
        Ok(self)
    }

    /// Dispatch a request path (no leading slash) to a view.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute, DispatchError> {
        for route in &self.routes {
            match &route.target {
                RouteTarget::View(view) => {
                    if let Some(params) = route.pattern.match_full(path) {
                        return Ok(ResolvedRoute {
                            view: view.clone(),
                            params,
                            name: route.name.clone(),
                        });
                    }
                }
                RouteTarget::Include { table, namespace } => {
                    if let Some((mut params, rest)) = route.pattern.match_prefix(path) {
                        // Control transfers on the first prefix match; a miss
                        // below is final.
                        let inner = table.resolve(rest)?;
                        params.extend(inner.params);
                        let name = match (namespace, inner.name) {
                            (Some(ns), Some(inner_name)) => Some(format!("{ns}:{inner_name}")),
                            (_, inner_name) => inner_name,
                        };
                        return Ok(ResolvedRoute {
                            view: inner.view,
                            params,
                            name,
                        });
                    }
                }
            }
        }
        Err(DispatchError::NotFound)
    }

    /// Reverse a route name into an absolute path.
    ///
    /// Bare names resolve against view routes and non-namespaced includes;
    /// `ns:rest` descends only into the include registered under `ns`.
    pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, ReverseError> {
        self.reverse_inner(name, params).map(|path| format!("/{path}"))
    }

    fn reverse_inner(&self, name: &str, params: &[(&str, &str)]) -> Result<String, ReverseError> {
        if let Some((ns, rest)) = name.split_once(':') {
            for route in &self.routes {
                if let RouteTarget::Include {
                    table,
                    namespace: Some(registered),
                } = &route.target
                {
                    if registered == ns {
                        let prefix = route.pattern.reverse(params)?;
                        let tail = table.reverse_inner(rest, params)?;
                        return Ok(format!("{prefix}{tail}"));
                    }
                }
            }
            return Err(ReverseError::UnknownName(name.to_string()));
        }

        for route in &self.routes {
            match &route.target {
                RouteTarget::View(_) if route.name.as_deref() == Some(name) => {
                    return route.pattern.reverse(params);
                }
                RouteTarget::Include {
                    table,
                    namespace: None,
                } => {
                    if let Ok(tail) = table.reverse_inner(name, params) {
                        let prefix = route.pattern.reverse(params)?;
                        return Ok(format!("{prefix}{tail}"));
                    }
                }
                _ => {}
            }
        }
        Err(ReverseError::UnknownName(name.to_string()))
    }

    /// Every named route in the table, includes flattened, with fully
    /// qualified names and absolute pattern paths.
    pub fn route_names(&self) -> Vec<NamedRoute> {
        let mut out = Vec::new();
        self.collect_names("", "", &mut out);
        out
    }

    fn collect_names(&self, name_prefix: &str, path_prefix: &str, out: &mut Vec<NamedRoute>) {
        for route in &self.routes {
            match &route.target {
                RouteTarget::View(_) => {
                    if let Some(name) = &route.name {
                        out.push(NamedRoute {
                            name: format!("{name_prefix}{name}"),
                            path: format!("/{path_prefix}{}", route.pattern.text()),
                        });
                    }
                }
                RouteTarget::Include { table, namespace } => {
                    let inner_names = match namespace {
                        Some(ns) => format!("{name_prefix}{ns}:"),
                        None => name_prefix.to_string(),
                    };
                    let inner_paths = format!("{path_prefix}{}", route.pattern.text());
                    table.collect_names(&inner_names, &inner_paths, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::view_fn;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn page() -> Arc<dyn View> {
        view_fn(|_request, _params| async { StatusCode::OK.into_response() })
    }

    fn sub_table() -> RouteTable {
        RouteTable::new()
            .view("", Some("index"), page())
            .unwrap()
            .view("widgets/{id}/", Some("widget-detail"), page())
            .unwrap()
    }

    #[test]
    fn first_match_wins_in_declaration_order() {
        // A catch-all declared first shadows everything after it.
        let table = RouteTable::new()
            .view("{*rest}", Some("catch-all"), page())
            .unwrap()
            .include("admin/", None, sub_table())
            .unwrap();
        let resolved = table.resolve("admin/widgets/1/").unwrap();
        assert_eq!(resolved.name.as_deref(), Some("catch-all"));
    }

    #[test]
    fn include_strips_prefix_and_recurses() {
        let table = RouteTable::new()
            .include("api/", Some("api"), sub_table())
            .unwrap();
        let resolved = table.resolve("api/widgets/5/").unwrap();
        assert_eq!(resolved.name.as_deref(), Some("api:widget-detail"));
        assert_eq!(resolved.params.get("id"), Some("5"));
    }

    #[test]
    fn matched_include_commits_on_miss() {
        // Both includes could serve the path; the first one matched commits,
        // so a miss inside it never falls through to the second.
        let fallback = RouteTable::new()
            .view("{*rest}", Some("fallback"), page())
            .unwrap();
        let table = RouteTable::new()
            .include("api/", Some("api"), sub_table())
            .unwrap()
            .include("api/", None, fallback)
            .unwrap();
        assert_eq!(
            table.resolve("api/nope/").unwrap_err(),
            DispatchError::NotFound
        );
    }

    #[test]
    fn unmatched_path_is_not_found() {
        let table = RouteTable::new()
            .include("api/", Some("api"), sub_table())
            .unwrap();
        assert_eq!(table.resolve("blog/").unwrap_err(), DispatchError::NotFound);
        assert_eq!(table.resolve("").unwrap_err(), DispatchError::NotFound);
    }

    #[test]
    fn namespaced_names_require_the_prefix() {
        let table = RouteTable::new()
            .include("api/", Some("api"), sub_table())
            .unwrap();
        assert_eq!(
            table.reverse("api:widget-detail", &[("id", "5")]).unwrap(),
            "/api/widgets/5/"
        );
        // The bare name is hidden behind the namespace.
        assert_eq!(
            table.reverse("widget-detail", &[("id", "5")]),
            Err(ReverseError::UnknownName("widget-detail".to_string()))
        );
    }

    #[test]
    fn non_namespaced_include_exposes_bare_names() {
        let table = RouteTable::new()
            .include("admin/", None, sub_table())
            .unwrap();
        assert_eq!(table.reverse("index", &[]).unwrap(), "/admin/");
        let resolved = table.resolve("admin/").unwrap();
        assert_eq!(resolved.name.as_deref(), Some("index"));
    }

    #[test]
    fn reverse_reports_missing_params() {
        let table = RouteTable::new()
            .include("api/", Some("api"), sub_table())
            .unwrap();
        assert_eq!(
            table.reverse("api:widget-detail", &[]),
            Err(ReverseError::MissingParam("id".to_string()))
        );
        assert_eq!(
            table.reverse("api:missing", &[]),
            Err(ReverseError::UnknownName("api:missing".to_string()))
        );
    }

    #[test]
    fn route_names_are_fully_qualified() {
        let table = RouteTable::new()
            .view("", Some("home"), page())
            .unwrap()
            .include("api/", Some("api"), sub_table())
            .unwrap();
        let names = table.route_names();
        assert!(names.contains(&NamedRoute {
            name: "home".to_string(),
            path: "/".to_string(),
        }));
        assert!(names.contains(&NamedRoute {
            name: "api:widget-detail".to_string(),
            path: "/api/widgets/{id}/".to_string(),
        }));
    }
}
