//! Command-line consumer for the milky focus core.
//!
//! # Responsibility
//! - Wire the focus store to a local SQLite file and the assistant endpoint.
//! - Demonstrate the placeholder-then-update chat flow keyed by log id.

use milky_core::db::open_db;
use milky_core::{
    default_log_level, init_logging, parse_entry_id, AssistantClient, AssistantConfig, EntryId,
    FocusStore, KvRepository, LastSessionSnapshot, LogKind, Mood, Quadrant, SqliteKvRepository,
    TimerMode,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: milky <command>

commands:
  add <quadrant> <text...>   add a task (do_first|schedule|delegate|eliminate)
  list                       show the quadrant board
  done <id>                  toggle a task complete (praise first, then record)
  rm <id>                    remove a task
  plan <id>                  ask the assistant for tiny first steps
  chat <message...>          chat with the assistant
  mode <mode> [seconds]      switch timer mode, optionally override duration
  finish [mood]              record the finished session (great|good|okay|tired|overwhelmed)
  history                    show completed sessions
  version                    print core version";

#[tokio::main]
async fn main() -> ExitCode {
    if let Some(dir) = env::var_os("MILKY_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let args: Vec<String> = env::args().skip(1).collect();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> Result<(), String> {
    let Some((command, rest)) = args.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };

    if command == "version" {
        println!("milky_core {}", milky_core::core_version());
        return Ok(());
    }

    let conn = open_db(db_path()).map_err(|err| err.to_string())?;
    let repo = SqliteKvRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let mut store = FocusStore::open(repo).map_err(|err| err.to_string())?;

    match command.as_str() {
        "add" => {
            let (quadrant, text) = parse_quadrant_and_text(rest)?;
            let task = store
                .add_task(text, quadrant)
                .map_err(|err| err.to_string())?;
            println!("added {} to {}", task.id, quadrant.banner());
        }
        "list" => print_board(&store),
        "done" => {
            let id = parse_id_arg(rest)?;
            let Some(task) = store.tasks().iter().find(|task| task.id == id).cloned() else {
                return Err(format!("no task with id {id}"));
            };
            store
                .toggle_task_complete(id)
                .map_err(|err| err.to_string())?;

            if task.completed {
                println!("reopened: {}", task.text);
                return Ok(());
            }

            // Praise comes back before the completion record goes into the
            // log, so the acknowledgment reads first.
            let client = AssistantClient::new(AssistantConfig::default());
            let praise = client
                .ask(
                    &format!("I just finished \"{}\". Give me one short line of praise.", task.text),
                    "The user completed a task and needs a quick acknowledgment.",
                )
                .await;
            store.add_milky_log(praise).map_err(|err| err.to_string())?;
            store
                .add_milky_log(format!("Completed: \"{}\"", task.text))
                .map_err(|err| err.to_string())?;
            println!("done: {}", task.text);
        }
        "rm" => {
            let id = parse_id_arg(rest)?;
            let removed = store.remove_task(id).map_err(|err| err.to_string())?;
            println!("{}", if removed { "removed" } else { "nothing to remove" });
        }
        "plan" => {
            let id = parse_id_arg(rest)?;
            let Some(task) = store.tasks().iter().find(|task| task.id == id).cloned() else {
                return Err(format!("no task with id {id}"));
            };
            let client = AssistantClient::new(AssistantConfig::default());
            let answer = client
                .ask(
                    &format!("Break the task \"{}\" into three tiny first steps.", task.text),
                    "The user wants the smallest possible activation steps.",
                )
                .await;
            for step in answer
                .lines()
                .map(|line| line.trim().trim_start_matches(['-', '*']).trim())
                .filter(|line| !line.is_empty())
            {
                store
                    .append_task_ai_step(id, step)
                    .map_err(|err| err.to_string())?;
            }
            println!("{answer}");
        }
        "chat" => {
            if rest.is_empty() {
                return Err("chat needs a message".to_string());
            }
            let message = rest.join(" ");
            store
                .add_log(message.clone(), LogKind::User)
                .map_err(|err| err.to_string())?;
            // The returned id is the only safe way to fill the bubble in
            // once the reply lands; the log may shift meanwhile.
            let placeholder = store
                .add_milky_log("Thinking...")
                .map_err(|err| err.to_string())?;

            let client = AssistantClient::new(AssistantConfig::default());
            let context = chat_context(&store);
            let reply = client.ask(&message, &context).await;
            store
                .update_log_content(placeholder, reply)
                .map_err(|err| err.to_string())?;
            print_log(&store);
        }
        "mode" => {
            let Some(mode_arg) = rest.first() else {
                return Err("mode needs one of focus|hyperfocus|short_break|long_break".to_string());
            };
            let mode = TimerMode::parse(mode_arg)
                .ok_or_else(|| format!("unknown mode `{mode_arg}`"))?;
            store.set_timer_mode(mode).map_err(|err| err.to_string())?;
            if let Some(seconds) = rest.get(1) {
                let seconds: u32 = seconds
                    .parse()
                    .map_err(|_| format!("invalid duration `{seconds}`"))?;
                store
                    .set_timer_duration(seconds)
                    .map_err(|err| err.to_string())?;
            }
            let timer = store.timer();
            println!(
                "mode={} duration={}s remaining={}s",
                timer.mode.as_str(),
                timer.initial_duration_secs,
                timer.time_left_secs
            );
        }
        "finish" => {
            let mood = match rest.first() {
                Some(raw) => {
                    Some(Mood::parse(raw).ok_or_else(|| format!("unknown mood `{raw}`"))?)
                }
                None => None,
            };
            // Session completion is driven from here, not by the core: the
            // ledger entry and the reflection snapshot are both ours to fill.
            let timer = store.timer().clone();
            store
                .add_to_history(timer.initial_duration_secs, timer.mode, mood)
                .map_err(|err| err.to_string())?;
            store.set_last_session(LastSessionSnapshot {
                duration_secs: timer.initial_duration_secs,
                mode: timer.mode,
                mood,
            });
            store
                .set_timer_running(false)
                .map_err(|err| err.to_string())?;
            println!(
                "recorded {}s {} session",
                timer.initial_duration_secs,
                timer.mode.as_str()
            );
        }
        "history" => {
            for record in store.history() {
                println!(
                    "{}  {}s  {}  mood={}",
                    record.timestamp_ms,
                    record.duration_secs,
                    record.mode.as_str(),
                    record.mood.map(|mood| mood.as_str()).unwrap_or("-")
                );
            }
        }
        other => return Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }

    Ok(())
}

fn db_path() -> PathBuf {
    env::var_os("MILKY_DB")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("milky.sqlite3"))
}

fn parse_quadrant_and_text(rest: &[String]) -> Result<(Quadrant, String), String> {
    let Some((quadrant_arg, text_parts)) = rest.split_first() else {
        return Err("add needs a quadrant and task text".to_string());
    };
    let quadrant = Quadrant::parse(quadrant_arg)
        .ok_or_else(|| format!("unknown quadrant `{quadrant_arg}`"))?;
    if text_parts.is_empty() {
        return Err("add needs task text".to_string());
    }
    Ok((quadrant, text_parts.join(" ")))
}

fn parse_id_arg(rest: &[String]) -> Result<EntryId, String> {
    let Some(raw) = rest.first() else {
        return Err("expected a task id".to_string());
    };
    parse_entry_id(raw).ok_or_else(|| format!("invalid id `{raw}`"))
}

fn print_board<R: KvRepository>(store: &FocusStore<R>) {
    for quadrant in Quadrant::ALL {
        println!("{}", quadrant.banner());
        for task in store.tasks_in_quadrant(quadrant) {
            let mark = if task.completed { "x" } else { " " };
            println!("  [{mark}] {}  {}", task.id, task.text);
            for step in &task.ai_steps {
                println!("        - {step}");
            }
        }
    }
}

fn chat_context<R: KvRepository>(store: &FocusStore<R>) -> String {
    match store.active_task_name() {
        Some(name) => format!("The user is currently working on: {name}."),
        None => String::new(),
    }
}

fn print_log<R: KvRepository>(store: &FocusStore<R>) {
    for entry in store.logs() {
        let who = match entry.kind {
            LogKind::Milky => "milky",
            LogKind::User => "user ",
        };
        println!("{who} | {}", entry.text);
    }
}
