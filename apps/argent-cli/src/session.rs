//! Interactive domain sessions.
//!
//! All three domains share one state machine: look the record up, create it
//! through a prompt loop if absent (to do list and inventory only; profiles
//! come from the register flow), display it as a table, then optionally edit
//! until the user stops or empties the whole record.
//!
//! Prompts are plain line-oriented loops. Invalid menu input re-prompts the
//! same step; a rejected entry (empty name or value) is reported and the
//! loop continues rather than silently dropping it.

use std::io::{self, BufRead, Write};

use argent_storage::{Domain, RecordStore, UserId};

use crate::table;

/// Token that leaves the entry loop at the name prompt.
const LEAVE_TOKEN: &str = "n";

fn noun(domain: Domain) -> &'static str {
    match domain {
        Domain::Profile => "profile",
        Domain::ToDo => "to do list",
        Domain::Inventory => "inventory",
    }
}

/// Console sentinel that deletes the whole record from the edit loop.
fn empty_sentinel(domain: Domain) -> &'static str {
    match domain {
        Domain::Profile => "empty profile",
        Domain::ToDo => "empty list",
        Domain::Inventory => "empty inventory",
    }
}

fn table_headers(domain: Domain) -> (&'static str, &'static str) {
    match domain {
        Domain::ToDo => ("Name", "Task"),
        Domain::Profile | Domain::Inventory => ("Type", "Details"),
    }
}

/// Run the full session for one (domain, user) record.
pub async fn run_session(
    store: &dyn RecordStore,
    domain: Domain,
    user: &UserId,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if store.read_record(domain, user).await?.is_none() {
        // Profile creation is owned by the register flow, not the session.
        if domain == Domain::Profile {
            writeln!(
                out,
                "No profile found for '{}'. Run 'argent register' to create one.",
                user.0
            )?;
            return Ok(());
        }
        writeln!(
            out,
            "There is no {} on record for '{}'. Let's make one now.",
            noun(domain),
            user.0
        )?;
        store.ensure_exists(domain, user).await?;
        create_flow(store, domain, user, input, out).await?;
    } else {
        writeln!(out, "Welcome back, {}.", user.0)?;
    }

    review(store, domain, user, input, out).await
}

/// Display the record, then offer one round of editing.
pub async fn review(
    store: &dyn RecordStore,
    domain: Domain,
    user: &UserId,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    display(store, domain, user, out).await?;
    let question = format!("Update your {}? [y/n]: ", noun(domain));
    if ask_yes_no(input, out, &question)? {
        edit_flow(store, domain, user, input, out).await?;
    }
    Ok(())
}

/// Prompt loop adding fields to a record that already exists.
pub async fn create_flow(
    store: &dyn RecordStore,
    domain: Domain,
    user: &UserId,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let prompt = format!("Entry name (or '{LEAVE_TOKEN}' to leave): ");
        let Some(name) = prompt_line(input, out, &prompt)? else {
            return Ok(());
        };
        if name.eq_ignore_ascii_case(LEAVE_TOKEN) {
            return Ok(());
        }
        let Some(value) = prompt_line(input, out, "Entry value: ")? else {
            return Ok(());
        };
        if name.is_empty() || value.is_empty() {
            writeln!(out, "A name and a value are both required; nothing saved.")?;
        } else {
            store.set_field(domain, user, &name, &value).await?;
        }
        if !ask_yes_no(input, out, "Add another entry? [y/n]: ")? {
            return Ok(());
        }
    }
}

/// Edit loop: re-set fields one at a time, or empty the whole record.
pub async fn edit_flow(
    store: &dyn RecordStore,
    domain: Domain,
    user: &UserId,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let sentinel = empty_sentinel(domain);
    loop {
        display(store, domain, user, out).await?;
        let prompt = format!("Entry name to update (or '{sentinel}' to delete everything): ");
        let Some(name) = prompt_line(input, out, &prompt)? else {
            return Ok(());
        };
        if name == sentinel {
            store.delete_record(domain, user).await?;
            writeln!(out, "✓ Your {} was emptied.", noun(domain))?;
            return Ok(());
        }
        let Some(value) = prompt_line(input, out, "New value: ")? else {
            return Ok(());
        };
        if name.is_empty() || value.is_empty() {
            writeln!(out, "A name and a value are both required; nothing saved.")?;
        } else {
            store.set_field(domain, user, &name, &value).await?;
        }
        if !ask_yes_no(input, out, "Keep editing? [y/n]: ")? {
            return Ok(());
        }
    }
}

/// Render the record as a two-column table, id never included.
async fn display(
    store: &dyn RecordStore,
    domain: Domain,
    user: &UserId,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match store.read_record(domain, user).await? {
        Some(record) if !record.fields.is_empty() => {
            write!(out, "{}", table::render(&record, table_headers(domain)))?;
        }
        _ => writeln!(out, "(no entries yet)")?,
    }
    Ok(())
}

/// Prompt and read one trimmed line. `None` means the input stream closed.
pub fn prompt_line(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Yes/no question. Plain Enter counts as no; anything else re-prompts.
/// A closed input stream counts as no so sessions end instead of spinning.
pub fn ask_yes_no(
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    prompt: &str,
) -> io::Result<bool> {
    loop {
        let Some(answer) = prompt_line(input, out, prompt)? else {
            return Ok(false);
        };
        if answer.eq_ignore_ascii_case("y") {
            return Ok(true);
        }
        if answer.is_empty() || answer.eq_ignore_ascii_case("n") {
            return Ok(false);
        }
        writeln!(out, "Invalid input. Please enter 'y' or 'n'.")?;
    }
}
