//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use remote_collection::SharedState;
use std::rc::Rc;

use crate::api::HttpClient;
use crate::config::AppConfig;
use crate::models::{Role, Session, User};

/// Dashboard screens
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Projects,
    Members,
    Events,
    Letters,
    Archives,
    Finance,
    Periods,
    ActivityLogs,
    Profile,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Dashboard,
        Route::Projects,
        Route::Members,
        Route::Events,
        Route::Letters,
        Route::Archives,
        Route::Finance,
        Route::Periods,
        Route::ActivityLogs,
        Route::Profile,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Projects => "Projects",
            Route::Members => "Members",
            Route::Events => "Events",
            Route::Letters => "Letters",
            Route::Archives => "Archives",
            Route::Finance => "Finance",
            Route::Periods => "Periods",
            Route::ActivityLogs => "Activity Log",
            Route::Profile => "Profile",
        }
    }

    pub fn is_visible_to(&self, role: &Role) -> bool {
        match self {
            Route::Members => role.can_manage_members(),
            _ => true,
        }
    }
}

/// First screen after sign-in. A default password must be changed first.
pub fn landing_route(user: &User) -> Route {
    if user.is_password_changed {
        Route::Dashboard
    } else {
        Route::Profile
    }
}

/// Sidebar entries for `role`
pub fn menu_for(role: &Role) -> Vec<Route> {
    Route::ALL.into_iter().filter(|r| r.is_visible_to(role)).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<AppConfig>,
    client: StoredValue<Rc<HttpClient>, LocalStorage>,
    session: StoredValue<SharedState<Option<Session>>, LocalStorage>,
    /// Signed-in user, mirrored from the session state - read
    pub user: ReadSignal<Option<User>>,
    /// Current screen - read
    pub route: ReadSignal<Route>,
    set_route: WriteSignal<Route>,
    pub sidebar_collapsed: RwSignal<bool>,
    pub theme: RwSignal<Theme>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let session = SharedState::new(None::<Session>);
        let client = Rc::new(HttpClient::new(config.api_base_url.clone(), session.clone()));

        let (user, set_user) = signal(None::<User>);
        let mirrored = session.clone();
        // Lives as long as the app; never unsubscribed
        session.subscribe(move || {
            let current = mirrored.read(|s| s.as_ref().map(|s| s.user.clone()));
            set_user.set(current);
        });

        let (route, set_route) = signal(Route::Dashboard);
        Self {
            config: StoredValue::new(config),
            client: StoredValue::new_local(client),
            session: StoredValue::new_local(session),
            user,
            route,
            set_route,
            sidebar_collapsed: RwSignal::new(false),
            theme: RwSignal::new(Theme::Light),
        }
    }

    pub fn client(&self) -> Rc<HttpClient> {
        self.client.get_value()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.with(|u| u.as_ref().map(|u| u.role.clone()))
    }

    /// Reactive permission check; false when signed out
    pub fn allows(&self, check: impl Fn(&Role) -> bool) -> bool {
        self.user.with(|u| u.as_ref().map(|u| check(&u.role)).unwrap_or(false))
    }

    pub fn sign_in(&self, session: Session) {
        log::info!("signed in as {}", session.user.username);
        self.set_route.set(landing_route(&session.user));
        self.session.with_value(|s| s.set(Some(session)));
    }

    pub fn sign_out(&self) {
        self.session.with_value(|s| s.set(None));
    }

    pub fn navigate(&self, route: Route) {
        self.set_route.set(route);
    }

    pub fn page_size(&self) -> u32 {
        self.config.with_value(|c| c.fetch_all_page_size)
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
