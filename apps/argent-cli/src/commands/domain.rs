use std::io;

use argent_storage::{Domain, RecordStore, UserId};

use crate::session::run_session;

/// Open the interactive session for one (domain, user) record on the
/// process's own terminal.
pub async fn cmd_open(
    store: &dyn RecordStore,
    domain: Domain,
    username: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let user = UserId::new(username);
    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    run_session(store, domain, &user, &mut input, &mut out).await
}
