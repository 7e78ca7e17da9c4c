//! Screen routes and the back stack.
//!
//! Every resource gets four screens that share its collection path:
//!
//! | Route    | Path                        |
//! |----------|-----------------------------|
//! | List     | `/hostel/buildings`         |
//! | Create   | `/hostel/buildings/new`     |
//! | Detail   | `/hostel/buildings/{id}`    |
//! | Edit     | `/hostel/buildings/{id}/edit` |
//!
//! plus the fixed screens `/login`, `/`, `/profile`, and
//! `/profile/change-password`.

use std::fmt;

use schoolhub_client::{Resource, resources};

use crate::effects::Effect;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Profile,
    ChangePassword,
    List { base: &'static str },
    Detail { base: &'static str, id: String },
    Create { base: &'static str },
    Edit { base: &'static str, id: String },
}

impl Route {
    pub fn list<R: Resource>() -> Self {
        Self::List { base: R::PATH }
    }

    pub fn detail<R: Resource>(id: impl Into<String>) -> Self {
        Self::Detail {
            base: R::PATH,
            id: id.into(),
        }
    }

    pub fn create<R: Resource>() -> Self {
        Self::Create { base: R::PATH }
    }

    pub fn edit<R: Resource>(id: impl Into<String>) -> Self {
        Self::Edit {
            base: R::PATH,
            id: id.into(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::ChangePassword => "/profile/change-password".to_string(),
            Self::List { base } => (*base).to_string(),
            Self::Detail { base, id } => format!("{base}/{id}"),
            Self::Create { base } => format!("{base}/new"),
            Self::Edit { base, id } => format!("{base}/{id}/edit"),
        }
    }

    /// Screens reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolves paths back into routes for the registered resources.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    bases: Vec<&'static str>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with every resource the client knows about.
    pub fn standard() -> Self {
        let mut table = Self::new();
        macro_rules! register_all {
            ($table:ident; $($resource:ident),* $(,)?) => {
                $($table.register::<resources::$resource>();)*
            };
        }
        register_all!(
            table;
            Students,
            Parents,
            Teachers,
            Departments,
            Subjects,
            Classes,
            Sections,
            Exams,
            ExamResults,
            FeeStructures,
            FeePayments,
            Books,
            BookIssues,
            Vehicles,
            TransportRoutes,
            TransportAllocations,
            HostelBuildings,
            HostelRooms,
            HostelAllocations,
            Staff,
            LeaveRequests,
            InventoryItems,
            Suppliers,
            PurchaseOrders,
            Notices,
            Messages,
        );
        table
    }

    pub fn register<R: Resource>(&mut self) -> &mut Self {
        self.register_base(R::PATH)
    }

    pub fn register_base(&mut self, base: &'static str) -> &mut Self {
        if !self.bases.contains(&base) {
            self.bases.push(base);
            // Longest first so `/exams/results` wins over `/exams`.
            self.bases.sort_by_key(|b| std::cmp::Reverse(b.len()));
        }
        self
    }

    pub fn parse(&self, path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" | "/dashboard" => return Some(Route::Dashboard),
            "/login" => return Some(Route::Login),
            "/profile" => return Some(Route::Profile),
            "/profile/change-password" => return Some(Route::ChangePassword),
            _ => {}
        }

        self.bases.iter().find_map(|&base| {
            let rest = path.strip_prefix(base)?;
            if rest.is_empty() {
                return Some(Route::List { base });
            }
            let segments: Vec<&str> = rest.strip_prefix('/')?.split('/').collect();
            match segments.as_slice() {
                ["new"] => Some(Route::Create { base }),
                [id] if !id.is_empty() => Some(Route::Detail {
                    base,
                    id: (*id).to_string(),
                }),
                [id, "edit"] if !id.is_empty() => Some(Route::Edit {
                    base,
                    id: (*id).to_string(),
                }),
                _ => None,
            }
        })
    }
}

/// The back stack. Never empty.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> &Route {
        // The stack always holds the start route.
        &self.stack[self.stack.len() - 1]
    }

    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes a route unless it is already on top.
    pub fn navigate(&mut self, route: Route) {
        if self.current() != &route {
            self.stack.push(route);
        }
    }

    /// Pops the top route. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Pops back to the most recent occurrence of `route`.
    pub fn pop_to(&mut self, route: &Route) -> bool {
        match self.stack.iter().rposition(|r| r == route) {
            Some(index) => {
                self.stack.truncate(index + 1);
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self, route: Route) {
        self.stack = vec![route];
    }

    /// Applies a navigation effect. Returns false for effects that are not
    /// about navigation.
    pub fn apply(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::Navigate(route) => self.navigate(route.clone()),
            Effect::NavigateBack => {
                self.back();
            }
            Effect::ResetTo(route) => self.reset(route.clone()),
            Effect::ShowToast(_) => return false,
        }
        true
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_client::resources::{ExamResults, Exams, HostelBuildings, Students};

    #[test]
    fn test_resource_paths() {
        assert_eq!(Route::list::<Students>().path(), "/students");
        assert_eq!(Route::detail::<Students>("s-1").path(), "/students/s-1");
        assert_eq!(Route::create::<HostelBuildings>().path(), "/hostel/buildings/new");
        assert_eq!(Route::edit::<Students>("s-1").path(), "/students/s-1/edit");
        assert_eq!(Route::ChangePassword.to_string(), "/profile/change-password");
    }

    #[test]
    fn test_parse_round_trips_every_shape() {
        let table = RouteTable::standard();
        for route in [
            Route::Login,
            Route::Dashboard,
            Route::Profile,
            Route::ChangePassword,
            Route::list::<HostelBuildings>(),
            Route::create::<HostelBuildings>(),
            Route::detail::<Students>("abc"),
            Route::edit::<Students>("abc"),
        ] {
            assert_eq!(table.parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_parse_prefers_longest_base() {
        let table = RouteTable::standard();
        assert_eq!(table.parse("/exams/results"), Some(Route::list::<ExamResults>()));
        assert_eq!(table.parse("/exams/e-1"), Some(Route::detail::<Exams>("e-1")));
    }

    #[test]
    fn test_parse_tolerates_trailing_slash_and_query() {
        let table = RouteTable::standard();
        assert_eq!(table.parse("/students/?search=John"), Some(Route::list::<Students>()));
        assert_eq!(table.parse(""), Some(Route::Dashboard));
    }

    #[test]
    fn test_parse_unknown() {
        let table = RouteTable::standard();
        assert_eq!(table.parse("/studentsx"), None);
        assert_eq!(table.parse("/students/a/b/c"), None);
        assert_eq!(RouteTable::new().parse("/students"), None);
    }

    #[test]
    fn test_navigate_is_single_top() {
        let mut nav = Navigator::default();
        nav.navigate(Route::list::<Students>());
        nav.navigate(Route::list::<Students>());
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn test_back_stops_at_root() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Profile);
        assert!(nav.back());
        assert!(!nav.back());
        assert_eq!(nav.current(), &Route::Dashboard);
    }

    #[test]
    fn test_pop_to() {
        let mut nav = Navigator::default();
        nav.navigate(Route::list::<Students>());
        nav.navigate(Route::detail::<Students>("s-1"));
        nav.navigate(Route::edit::<Students>("s-1"));

        assert!(nav.pop_to(&Route::list::<Students>()));
        assert_eq!(nav.current(), &Route::list::<Students>());
        assert!(!nav.pop_to(&Route::Profile));
    }

    #[test]
    fn test_apply_effects() {
        let mut nav = Navigator::default();
        assert!(nav.apply(&Effect::Navigate(Route::create::<HostelBuildings>())));
        assert!(nav.apply(&Effect::NavigateBack));
        assert_eq!(nav.current(), &Route::Dashboard);

        assert!(nav.apply(&Effect::ResetTo(Route::Login)));
        assert_eq!(nav.stack(), &[Route::Login]);

        let toast = Effect::ShowToast(crate::effects::Toast::info("hi"));
        assert!(!nav.apply(&toast));
    }
}
