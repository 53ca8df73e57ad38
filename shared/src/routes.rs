/// Client-side pages, addressed by the URL fragment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Home,
    Login,
    Signup,
    Transactions,
    AddTransactions,
    Analysis,
}

impl Route {
    /// Parse a fragment such as `#transactions`. Unknown or empty fragments
    /// resolve to [`Route::Home`].
    pub fn from_hash(hash: &str) -> Self {
        let name = hash.trim().trim_start_matches('#');
        let name = name.split(['?', '/']).next().unwrap_or_default();
        match name {
            "login" => Route::Login,
            "signup" => Route::Signup,
            "transactions" => Route::Transactions,
            "add-transactions" => Route::AddTransactions,
            "analysis" => Route::Analysis,
            _ => Route::Home,
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Route::Home => "#home",
            Route::Login => "#login",
            Route::Signup => "#signup",
            Route::Transactions => "#transactions",
            Route::AddTransactions => "#add-transactions",
            Route::Analysis => "#analysis",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Transactions => "Transactions",
            Route::AddTransactions => "Add Transactions",
            Route::Analysis => "Analysis",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Transactions | Route::AddTransactions | Route::Analysis
        )
    }

    /// Where a visitor actually lands: protected pages send anonymous
    /// visitors to login, auth pages send signed-in users home
    pub fn resolve(self, authenticated: bool) -> Self {
        match (self, authenticated) {
            (route, false) if route.requires_auth() => Route::Login,
            (Route::Login | Route::Signup, true) => Route::Home,
            (route, _) => route,
        }
    }

    /// Entries of the navigation bar for the given session state
    pub fn navigation(authenticated: bool) -> &'static [Route] {
        if authenticated {
            &[
                Route::Home,
                Route::Transactions,
                Route::AddTransactions,
                Route::Analysis,
            ]
        } else {
            &[Route::Home, Route::Login, Route::Signup]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fragments() {
        for route in [
            Route::Home,
            Route::Login,
            Route::Signup,
            Route::Transactions,
            Route::AddTransactions,
            Route::Analysis,
        ] {
            assert_eq!(Route::from_hash(route.hash()), route);
        }
    }

    #[test]
    fn test_unknown_and_empty_fragments_go_home() {
        assert_eq!(Route::from_hash(""), Route::Home);
        assert_eq!(Route::from_hash("#"), Route::Home);
        assert_eq!(Route::from_hash("#settings"), Route::Home);
        assert_eq!(Route::from_hash("transactions?page=2"), Route::Transactions);
    }

    #[test]
    fn test_resolve_guards_protected_pages() {
        assert_eq!(Route::Analysis.resolve(false), Route::Login);
        assert_eq!(Route::Analysis.resolve(true), Route::Analysis);
        assert_eq!(Route::Login.resolve(true), Route::Home);
        assert_eq!(Route::Home.resolve(false), Route::Home);
    }
}
