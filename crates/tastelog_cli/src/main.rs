//! Interactive menu shell for the tastelog rating keeper.
//!
//! # Responsibility
//! - Present the fixed six-choice menu and dispatch record operations.
//! - Keep all interaction on generic reader/writer handles so tests can
//!   drive the shell with scripted input.
//!
//! # Invariants
//! - Every operation returns to the menu; only choice 6 or end of input
//!   leaves the loop.
//! - The schema bootstrap runs once at startup, before the loop.

use std::io::{self, BufRead, Write};

use log::info;
use tastelog_core::db::open_db;
use tastelog_core::{
    default_log_level, init_logging, parse_score, render_histogram, HistogramConfig, Restaurant,
    RestaurantId, RestaurantRepository, RestaurantService, ScoreParseError,
    SqliteRestaurantRepository,
};

const DB_FILE_NAME: &str = "tastelog.db";
const LOG_DIR_NAME: &str = "logs";

fn main() {
    init_process_logging();

    // An unreadable storage file is the one fatal failure.
    let conn = match open_db(DB_FILE_NAME) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: cannot open {DB_FILE_NAME}: {err}");
            std::process::exit(1);
        }
    };

    let repo = match SqliteRestaurantRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };
    let service = RestaurantService::new(repo);

    info!("event=shell_start module=cli status=ok db_file={DB_FILE_NAME}");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    if let Err(err) = run_shell(&service, &mut input, &mut stdout) {
        eprintln!("error: {err}");
    }

    info!("event=shell_exit module=cli status=ok");
}

fn init_process_logging() {
    let Ok(current_dir) = std::env::current_dir() else {
        return;
    };
    let log_dir = current_dir.join(LOG_DIR_NAME);
    let Some(log_dir) = log_dir.to_str() else {
        return;
    };
    if let Err(message) = init_logging(default_log_level(), log_dir) {
        eprintln!("warning: logging disabled: {message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Register,
    List,
    Update,
    Delete,
    Visualize,
    Exit,
}

fn parse_menu_choice(input: &str) -> Option<MenuAction> {
    match input.trim() {
        "1" => Some(MenuAction::Register),
        "2" => Some(MenuAction::List),
        "3" => Some(MenuAction::Update),
        "4" => Some(MenuAction::Delete),
        "5" => Some(MenuAction::Visualize),
        "6" => Some(MenuAction::Exit),
        _ => None,
    }
}

fn run_shell<Repo, R, W>(
    service: &RestaurantService<Repo>,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    Repo: RestaurantRepository,
    R: BufRead,
    W: Write,
{
    loop {
        write_menu(out)?;
        let Some(choice) = prompt_line(input, out, "Select: ")? else {
            // End of input behaves like exit.
            return Ok(());
        };

        match parse_menu_choice(&choice) {
            Some(MenuAction::Register) => register(service, input, out)?,
            Some(MenuAction::List) => list(service, out)?,
            Some(MenuAction::Update) => update(service, input, out)?,
            Some(MenuAction::Delete) => delete(service, input, out)?,
            Some(MenuAction::Visualize) => visualize(service, out)?,
            Some(MenuAction::Exit) => {
                writeln!(out, "Bye.")?;
                return Ok(());
            }
            None => writeln!(out, "Invalid selection.")?,
        }
    }
}

fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "1. Register restaurant")?;
    writeln!(out, "2. List restaurants")?;
    writeln!(out, "3. Update restaurant")?;
    writeln!(out, "4. Delete restaurant")?;
    writeln!(out, "5. Visualize scores")?;
    writeln!(out, "6. Exit")?;
    Ok(())
}

/// Prompts and reads one line, `None` on end of input.
fn prompt_line<R, W>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Prompts for a score until the input passes range validation.
///
/// With `keep_on_empty` set, an empty line short-circuits to that value
/// without validation (the update flow's keep-current rule).
fn prompt_score<R, W>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    keep_on_empty: Option<f64>,
) -> io::Result<Option<f64>>
where
    R: BufRead,
    W: Write,
{
    loop {
        let Some(text) = prompt_line(input, out, prompt)? else {
            return Ok(None);
        };

        if text.trim().is_empty() {
            if let Some(current) = keep_on_empty {
                return Ok(Some(current));
            }
        }

        match parse_score(&text) {
            Ok(score) => return Ok(Some(score)),
            Err(ScoreParseError::NotNumeric(_)) => writeln!(out, "Please enter a number.")?,
            Err(ScoreParseError::OutOfRange(_)) => {
                writeln!(out, "Enter a number between 1 and 5.")?;
            }
        }
    }
}

/// Prompts for a record id; a non-numeric answer aborts the operation.
fn prompt_id<R, W>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<RestaurantId>>
where
    R: BufRead,
    W: Write,
{
    let Some(text) = prompt_line(input, out, prompt)? else {
        return Ok(None);
    };

    match text.trim().parse::<RestaurantId>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            writeln!(out, "Please enter a number.")?;
            Ok(None)
        }
    }
}

fn register<Repo, R, W>(
    service: &RestaurantService<Repo>,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    Repo: RestaurantRepository,
    R: BufRead,
    W: Write,
{
    let name = loop {
        let Some(name) = prompt_line(input, out, "Restaurant name: ")? else {
            return Ok(());
        };
        if name.trim().is_empty() {
            writeln!(out, "Name cannot be empty.")?;
            continue;
        }
        break name.trim().to_string();
    };

    let Some(score) = prompt_score(input, out, "Score (1.0-5.0, one decimal): ", None)? else {
        return Ok(());
    };

    match service.register(name.as_str(), score) {
        Ok(id) => writeln!(out, "Registered with id {id}."),
        Err(err) => writeln!(out, "error: {err}"),
    }
}

fn list<Repo, W>(service: &RestaurantService<Repo>, out: &mut W) -> io::Result<()>
where
    Repo: RestaurantRepository,
    W: Write,
{
    let records = match service.list() {
        Ok(records) => records,
        Err(err) => return writeln!(out, "error: {err}"),
    };
    write_records(&records, out)
}

fn write_records<W: Write>(records: &[Restaurant], out: &mut W) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No restaurants recorded.");
    }

    writeln!(out, "ID\tName\tScore")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for record in records {
        writeln!(out, "{}\t{}\t{:.1}", record.id, record.name, record.score)?;
    }
    Ok(())
}

fn update<Repo, R, W>(
    service: &RestaurantService<Repo>,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    Repo: RestaurantRepository,
    R: BufRead,
    W: Write,
{
    list(service, out)?;

    let Some(id) = prompt_id(input, out, "ID to update: ")? else {
        return Ok(());
    };

    let current = match service.get(id) {
        Ok(Some(record)) => record,
        Ok(None) => return writeln!(out, "No restaurant with that id."),
        Err(err) => return writeln!(out, "error: {err}"),
    };

    let name_prompt = format!("New name (current: {}) [Enter to keep]: ", current.name);
    let Some(name_input) = prompt_line(input, out, &name_prompt)? else {
        return Ok(());
    };
    let name = if name_input.trim().is_empty() {
        current.name.clone()
    } else {
        name_input.trim().to_string()
    };

    let score_prompt = format!(
        "New score (1.0-5.0) (current: {:.1}) [Enter to keep]: ",
        current.score
    );
    let Some(score) = prompt_score(input, out, &score_prompt, Some(current.score))? else {
        return Ok(());
    };

    let updated = Restaurant { id, name, score };
    match service.update(&updated) {
        Ok(()) => writeln!(out, "Updated."),
        Err(err) => writeln!(out, "error: {err}"),
    }
}

fn delete<Repo, R, W>(
    service: &RestaurantService<Repo>,
    input: &mut R,
    out: &mut W,
) -> io::Result<()>
where
    Repo: RestaurantRepository,
    R: BufRead,
    W: Write,
{
    list(service, out)?;

    let Some(id) = prompt_id(input, out, "ID to delete: ")? else {
        return Ok(());
    };

    let record = match service.get(id) {
        Ok(Some(record)) => record,
        Ok(None) => return writeln!(out, "No restaurant with that id."),
        Err(err) => return writeln!(out, "error: {err}"),
    };

    writeln!(out, "{}\t{}\t{:.1}", record.id, record.name, record.score)?;
    let confirm_prompt = format!("Delete {}? (y/n): ", record.name);
    let Some(answer) = prompt_line(input, out, &confirm_prompt)? else {
        return Ok(());
    };

    if answer.trim().eq_ignore_ascii_case("y") {
        match service.delete(id) {
            Ok(()) => writeln!(out, "Deleted."),
            Err(err) => writeln!(out, "error: {err}"),
        }
    } else {
        writeln!(out, "Delete cancelled.")
    }
}

fn visualize<Repo, W>(service: &RestaurantService<Repo>, out: &mut W) -> io::Result<()>
where
    Repo: RestaurantRepository,
    W: Write,
{
    let scores = match service.scores() {
        Ok(scores) => scores,
        Err(err) => return writeln!(out, "error: {err}"),
    };

    if scores.is_empty() {
        return writeln!(out, "No score data.");
    }

    render_histogram(&scores, &HistogramConfig::default(), out)
}
