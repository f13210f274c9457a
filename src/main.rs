use crate::catalog::{Catalog, LoadPolicy};
use crate::query::Query;
use crate::restaurant::RestaurantName;
use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tabled::settings::Style;

mod catalog;
mod day;
mod error;
mod query;
mod restaurant;
mod schedule;
mod time;

#[derive(Parser)]
#[command(about = "Find restaurants open at a given day and time")]
struct Args {
    /// Path to the restaurant hours file (CSV, or JSON when the name ends in .json)
    #[arg(short, long, value_name = "FILE", default_value = "data/rest_hours.csv")]
    csv: PathBuf,

    /// Date and time in ISO format (e.g. 2020-05-23T01:35:00)
    #[arg(short = 'D', long, value_name = "DATE")]
    date: Option<String>,

    /// Day of week (e.g. Sat); needs --time, and together they override --date
    #[arg(short, long)]
    day: Option<String>,

    /// Time in 24-hour HH:MM format (e.g. 17:30); needs --day
    #[arg(short, long)]
    time: Option<String>,

    /// List daily opening hours for all restaurants
    #[arg(short, long)]
    list: bool,

    /// Drop restaurants with unparsable hours instead of failing
    #[arg(long)]
    skip_invalid: bool,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match pager {
        Ok(pager) => pager,
        Err(_) => {
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

fn print_table(catalog: &Catalog) {
    let rows = catalog.render_weekly_table();
    let mut table = tabled::Table::new(&rows);
    table.with(Style::rounded());
    table.with(tabled::settings::Alignment::left());
    if rows.len() > 20 {
        paginate(table.to_string());
    } else {
        println!("{}", table);
    }
}

fn print_open(catalog: &Catalog, query: &Query) {
    let (day, time) = query.resolve();
    let open: Vec<RestaurantName> = catalog.find_open(query);
    println!(
        "Found {} open restaurant(s) on {} at {}:",
        open.len().to_string().bold(),
        day,
        time
    );
    for name in open {
        println!("  - {}", (&*name).green());
    }
}

fn shell(catalog: &Catalog) -> Result<(), Box<dyn std::error::Error>> {
    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "ls".to_string(),
            "open".to_string(),
            "at".to_string(),
            "now".to_string(),
            "hours".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => print_table(catalog),
                    "open" => {
                        if let (Some(day), Some(time)) = (parts.get(1), parts.get(2)) {
                            match Query::from_args(Some(*day), Some(*time), None) {
                                Ok(Some(query)) => print_open(catalog, &query),
                                Ok(None) => {}
                                Err(e) => println!("{}", e.to_string().red()),
                            }
                        } else {
                            println!("Usage: open <day> <HH:MM>");
                        }
                    },
                    "at" => {
                        if parts.len() > 1 {
                            let date = parts[1..].join(" ");
                            match Query::from_args(None, None, Some(date.as_str())) {
                                Ok(Some(query)) => print_open(catalog, &query),
                                Ok(None) => {}
                                Err(e) => println!("{}", e.to_string().red()),
                            }
                        } else {
                            println!("Usage: at <YYYY-MM-DDTHH:MM[:SS]>");
                        }
                    },
                    "now" => {
                        let query = Query::DateTime(chrono::Local::now().naive_local());
                        print_open(catalog, &query);
                    },
                    "hours" => {
                        if parts.len() > 1 {
                            let found = catalog.hours_of(&parts[1..].join(" "));
                            if found.is_empty() {
                                println!("No matching restaurants found.");
                            }
                            for (name, hours) in found {
                                println!("{}: {}", (&*name).bold(), hours);
                            }
                        } else {
                            println!("Usage: hours <name>");
                        }
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls                  - List daily opening hours for all restaurants");
                        println!("  open <day> <HH:MM>  - List restaurants open on <day> at 24-hour <HH:MM>");
                        println!("  at <date-time>      - List restaurants open at an ISO date-time, e.g. 2020-05-23T01:35");
                        println!("  now                 - List restaurants open right now");
                        println!("  hours <name>        - Show the weekly hours of restaurants matching <name>");
                        println!("  help / ?            - Show this help menu");
                        println!("  exit / quit         - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    let policy = if args.skip_invalid {
        LoadPolicy::SkipInvalid
    } else {
        LoadPolicy::FailClosed
    };
    let query = Query::from_args(args.day.as_deref(), args.time.as_deref(), args.date.as_deref())?;
    let catalog = Catalog::load_from_file(&args.csv, policy)?;

    if args.list {
        print_table(&catalog);
    }
    match query {
        Some(query) => print_open(&catalog, &query),
        None if args.list => {}
        None => {
            println!(
                "Loaded {} restaurants from {}. Type 'help' for commands.",
                catalog.restaurants.len(),
                args.csv.display()
            );
            shell(&catalog)?;
        }
    }
    Ok(())
}
