use std::sync::Arc;

use crush_db::Database;
use crush_match::Matcher;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub matcher: Matcher,
}
