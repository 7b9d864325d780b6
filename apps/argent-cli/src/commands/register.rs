use std::io::{self, BufRead, Write};

use argent_storage::{Domain, RecordStore, UserId};

use crate::session::{ask_yes_no, create_flow, prompt_line, review};
use crate::username;

pub async fn cmd_register(store: &dyn RecordStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    register(store, &mut input, &mut out).await
}

/// Username selection followed by first-time profile entry. Profile records
/// are only ever created here; the profile session reports absence instead.
pub async fn register(
    store: &dyn RecordStore,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(name) = choose_username(input, out)? else {
        return Ok(());
    };
    let user = UserId::new(name);

    store.ensure_exists(Domain::Profile, &user).await?;
    writeln!(out, "✓ Profile created for '{}'", user.0)?;
    writeln!(out, "Now add your profile details.")?;
    create_flow(store, Domain::Profile, &user, input, out).await?;
    review(store, Domain::Profile, &user, input, out).await
}

fn choose_username(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if ask_yes_no(input, out, "Generate a username for you? [y/n]: ")? {
        let name = username::generate();
        writeln!(out, "Your username is '{name}'")?;
        return Ok(Some(name));
    }

    writeln!(
        out,
        "Usernames are {}-{} characters, include at least one number, and use no special characters.",
        username::MIN_LEN,
        username::MAX_LEN
    )?;
    loop {
        let Some(candidate) = prompt_line(input, out, "Enter a username: ")? else {
            return Ok(None);
        };
        match username::validate(&candidate) {
            Ok(()) => return Ok(Some(candidate)),
            Err(e) => writeln!(out, "{e}")?,
        }
    }
}
