//! Interactive alarm shell.
//!
//! # Responsibility
//! - Drive `alarmdeck_core` through its intent API from typed commands.
//! - Answer confirmation prompts from stdin.
//!
//! # Environment
//! - `ALARMDECK_LOG_DIR`: absolute directory for rolling logs (logging off when unset).
//! - `ALARMDECK_LOG_LEVEL`: overrides the build-mode default level.
//! - `ALARMDECK_CATALOG`: path to a JSON catalog replacing the baseline options.

mod command;

use alarmdeck_core::{
    core_version, default_log_level, init_logging, Alarm, AlarmCatalog, AlarmId, AlarmService,
    DeleteOutcome, InMemoryAlarmRepository, SessionState, ToggleOutcome,
};
use command::{parse_command, AlarmRef, Command};
use log::info;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const HELP: &str = "\
commands:
  list                     show alarms
  show                     show the open add/edit form
  add                      open the add form
  edit <n|id>              open the edit form for an alarm
  set <field> <value>      change time|label|recurrence|sound in the open form
  save                     save the open form
  cancel                   close the open form without saving
  toggle <n|id>            enable or disable an alarm
  delete <n|id>            delete an alarm
  quit";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("alarmdeck: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("ALARMDECK_LOG_DIR") {
        let level = std::env::var("ALARMDECK_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        init_logging(level.as_str(), log_dir.as_str())?;
    }

    // Sample alarms use baseline sounds, so only seed them with the baseline catalog.
    let (catalog, seed) = match std::env::var("ALARMDECK_CATALOG") {
        Ok(path) => (
            AlarmCatalog::from_json_str(std::fs::read_to_string(&path)?.as_str())?,
            false,
        ),
        Err(_) => (AlarmCatalog::default(), true),
    };
    let mut service = AlarmService::new(InMemoryAlarmRepository::with_catalog(catalog)?)?;
    if seed {
        service.seed_sample_alarms()?;
    }
    info!("event=cli_start module=cli status=ok version={}", core_version());

    println!("alarmdeck {} (type `help`)", core_version());
    print_alarms(&service.alarms());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let command = match parse_command(line.as_str()) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        execute(&mut service, command, &stdin);
    }
    Ok(())
}

fn execute(
    service: &mut AlarmService<InMemoryAlarmRepository>,
    command: Command,
    stdin: &io::Stdin,
) {
    let mut prompt = |message: &str| ask_yes_no(stdin, message);

    match command {
        Command::List => print_alarms(&service.alarms()),
        Command::Show => print_session(service.session()),
        Command::Help => println!("{HELP}"),
        Command::Add => {
            service.request_start_add();
            print_session(service.session());
        }
        Command::Edit(target) => match resolve(service, &target) {
            Some(id) => match service.request_start_edit(id) {
                Ok(()) => print_session(service.session()),
                Err(err) => println!("{err}"),
            },
            None => println!("no such alarm"),
        },
        Command::Set { field, value } => {
            match service.request_field_change(field.as_str(), value.as_str()) {
                Ok(()) => print_session(service.session()),
                Err(err) => println!("{err}"),
            }
        }
        Command::Save => match service.request_commit() {
            Ok(alarm) => {
                println!("saved {}", format_alarm(&alarm));
                print_alarms(&service.alarms());
            }
            Err(err) => println!("not saved: {err}"),
        },
        Command::Cancel => service.request_cancel(),
        Command::Toggle(target) => match resolve(service, &target) {
            Some(id) => match service.request_toggle(id, &mut prompt) {
                Ok(ToggleOutcome::Applied(alarm)) => println!("{}", format_alarm(&alarm)),
                Ok(ToggleOutcome::Declined) => println!("left enabled"),
                Err(err) => println!("{err}"),
            },
            None => println!("no such alarm"),
        },
        Command::Delete(target) => match resolve(service, &target) {
            Some(id) => match service.request_delete(id, &mut prompt) {
                Ok(DeleteOutcome::Deleted { closed_edit }) => {
                    if closed_edit {
                        println!("edit form closed");
                    }
                    print_alarms(&service.alarms());
                }
                Ok(DeleteOutcome::Declined) => println!("kept"),
                Err(err) => println!("{err}"),
            },
            None => println!("no such alarm"),
        },
        Command::Quit => {}
    }
}

fn resolve(
    service: &AlarmService<InMemoryAlarmRepository>,
    target: &AlarmRef,
) -> Option<AlarmId> {
    match target {
        AlarmRef::Position(position) => service.alarms().get(position - 1).map(|alarm| alarm.id),
        AlarmRef::Id(id) => Some(*id),
    }
}

fn ask_yes_no(stdin: &io::Stdin, message: &str) -> bool {
    print!("{message} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match stdin.lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn print_alarms(alarms: &[Alarm]) {
    if alarms.is_empty() {
        println!("no alarms set");
        return;
    }
    for (index, alarm) in alarms.iter().enumerate() {
        println!("{:>2}. {}", index + 1, format_alarm(alarm));
    }
}

fn print_session(state: &SessionState) {
    match state {
        SessionState::Idle => println!("no form open"),
        SessionState::Adding { draft } => println!(
            "adding: time={} label={} recurrence={} sound={}",
            draft.time, draft.label, draft.recurrence, draft.sound
        ),
        SessionState::Editing { alarm_id, draft } => println!(
            "editing {alarm_id}: time={} label={} recurrence={} sound={}",
            draft.time, draft.label, draft.recurrence, draft.sound
        ),
    }
}

fn format_alarm(alarm: &Alarm) -> String {
    format!(
        "{} [{}] {} - {} ({})",
        alarm.time,
        if alarm.enabled { "on" } else { "off" },
        alarm.label,
        alarm.recurrence,
        alarm.sound
    )
}
