use shared::{Session, SessionEvent, User};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct SessionState {
    pub authenticated: bool,
    pub user: Option<User>,
    /// Most recent change, used to explain a forced logout
    pub last_event: Option<SessionEvent>,
}

impl SessionState {
    fn of(session: &Session, last_event: Option<SessionEvent>) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            user: session.user(),
            last_event,
        }
    }
}

/// Re-render whenever the session changes
#[hook]
pub fn use_session(session: &Session) -> SessionState {
    let state = {
        let session = session.clone();
        use_state(move || SessionState::of(&session, None))
    };

    {
        let state = state.clone();
        use_effect_with(session.clone(), move |session| {
            let observed = session.clone();
            let id = session.subscribe(move |event| {
                state.set(SessionState::of(&observed, Some(event)));
            });
            let session = session.clone();
            move || session.unsubscribe(id)
        });
    }

    (*state).clone()
}
