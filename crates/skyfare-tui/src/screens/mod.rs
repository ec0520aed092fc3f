//! Screen components, one per [`ScreenId`].

pub mod detail;
pub mod results;
pub mod search;

use skyfare_core::Session;

use crate::component::Component;
use crate::screen::ScreenId;

/// Build every screen over one shared session.
pub fn create_screens(session: &Session) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Search,
            Box::new(search::SearchScreen::new(session.search_form())),
        ),
        (
            ScreenId::Results,
            Box::new(results::ResultsScreen::new(session.results_view())),
        ),
        (
            ScreenId::Detail,
            Box::new(detail::DetailScreen::new(session.store().clone())),
        ),
    ]
}
