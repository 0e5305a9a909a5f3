//! # sales_insight
//! An in-memory product catalog with sales analytics, backed by a flat
//! data file.
//!
//! ## Features
//! - AVL tree index keyed by product id (ordered lookup, insert, delete)
//! - Whole-catalog analytics: revenue, best/least seller, per-location rollup
//! - Naive next-month prediction from a rolling window of past sales
//! - Line-oriented data file loaded at startup and saved at shutdown
//!
//! ## Usage
//! This crate is primarily consumed by the binary in `main.rs`,
//! which provides the REPL interface. All reusable logic and
//! unit tests live here so the project can be tested with `cargo test`.
// =====================================================================
// File: lib.rs
//
//   This module implements the command-line interface (CLI)
//   that accepts the following commands:
//
//     `ADD <id> <name> <weight> <color> <location> <units> <price>`
//                          -> Add a product (existing ids are rejected)
//     `ADD <id> | <name> | ... | <price>`
//                          -> Same, `|`-separated so text may hold spaces
//     `GET <id>`           -> Show one product
//     `LIST`               -> Show every product in id order
//     `UPDATE <id> <units> <past_sale>`
//                          -> Set units sold and record a monthly sale
//     `DEL <id>`           -> Delete a product
//     `INSIGHTS`           -> Total revenue, best and least seller
//     `LOCATION <location>`-> Units and revenue for one location
//     `PREDICT <id>`       -> Next-month sales from the rolling window
//     `SAVE`               -> Write the catalog to the data file
//     `HELP`               -> Print the command summary
//     `EXIT` / `QUIT`      -> Terminate the program (saved by the binary)
// =====================================================================
pub mod error;
pub use error::{Result, SalesError};

pub mod product;
pub use product::{Product, ProductId, SalesWindow};

pub mod index;
pub use index::AvlIndex;

pub mod analytics;
pub mod prediction;

pub mod storage;
pub use storage::{load_catalog, save_catalog, DATA_FILE};

pub mod session;
pub use session::Session;

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{debug, error};

/// Result of handling a single user command.
///
/// - `Continue` means the REPL should keep running.
/// - `Exit` means the REPL should break out and terminate.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Exit,
}

/// Short command summary printed on bad input and by `HELP`.
pub const PROPER_SYNTAX: &str = "Syntax Usage: ADD <id> <name> <weight> <color> <location> <units> <price> \
(or the same seven fields separated by '|'), GET <id>, LIST, UPDATE <id> <units> <past_sale>, DEL <id>, INSIGHTS, LOCATION <location>, \
PREDICT <id>, SAVE, HELP, EXIT";


/// Read–Evaluate–Print Loop (REPL) over standard input.
///
/// Continuously reads user commands, executes them against the given
/// [`Session`] and prints responses to standard output. Returns when
/// `EXIT` is entered or input ends.
///
/// # Example
/// ```no_run
/// use sales_insight::{Session, repl_loop};
///
/// let mut session = Session::open("sales_data.txt").unwrap();
/// repl_loop(&mut session); // <- waits for user input interactively
/// session.save().unwrap();
/// ```
pub fn repl_loop(session: &mut Session) {
    let stdin = io::stdin();
    run_commands(stdin.lock(), session);
}


/// Drives the command loop over any line source.
///
/// Split out of [`repl_loop`] so scripted input can be fed in tests.
pub fn run_commands<R: BufRead>(input: R, session: &mut Session) {
    prompt();
    for input_line in input.lines() {
        let full_command = match input_line {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "failed to read command input");
                break;
            }
        };
        let (cmd, args) = parse_command(&full_command);
        debug!(cmd = %cmd, args = args.len(), "command received");

        // Process command and arguments
        match handle_command(&cmd, &args, PROPER_SYNTAX, session) {
            CommandResult::Exit => break,
            CommandResult::Continue => prompt(),
        }
    }
}

fn prompt() {
    print!("sales> ");
    // A failed flush only loses the prompt
    let _ = io::stdout().flush();
}


/// Parses a raw input line into a command and its arguments.
///
/// The first token is treated as the command (normalized to uppercase),
/// and the remaining tokens are collected as arguments. Leading and
/// trailing whitespace is ignored.
pub fn parse_command(line: &str) -> (String, Vec<String>) {
    let trimmed_line = line.trim();
    let mut command_segments = trimmed_line.split_whitespace();
    // Pulling out the command to normalize if lowercase is used
    let cmd = command_segments.next().unwrap_or("").to_uppercase();
    // Remaining arguments
    let args: Vec<String> = command_segments.map(|s| s.to_string()).collect();

    (cmd, args)
}


/// Parses one command argument, naming the field on failure.
fn parse_arg<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
    raw.parse().map_err(|_| SalesError::InvalidField {
        field,
        value: raw.to_string(),
    })
}


/// Separator for `ADD` fields that contain spaces.
const FIELD_SEPARATOR: char = '|';

/// Number of fields `ADD` takes.
const ADD_FIELDS: usize = 7;


/// Splits `ADD` arguments into its seven fields.
///
/// Plain whitespace tokens are used as they are. Once any argument
/// holds a `|`, the arguments are joined back up and split on `|`
/// instead, with each field trimmed. Empty fields are rejected.
fn add_fields(args: &[String]) -> Option<Vec<String>> {
    let fields: Vec<String> = if args.iter().any(|arg| arg.contains(FIELD_SEPARATOR)) {
        args.join(" ")
            .split(FIELD_SEPARATOR)
            .map(|field| field.trim().to_string())
            .collect()
    } else {
        args.to_vec()
    };

    if fields.len() != ADD_FIELDS || fields.iter().any(|field| field.is_empty()) {
        return None;
    }
    Some(fields)
}


/// The location named by `LOCATION`, which is the rest of the line.
fn location_arg(args: &[String]) -> Option<String> {
    if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    }
}


/// Builds a product from the seven `ADD` fields.
fn product_from_args(args: &[String]) -> Result<Product> {
    Ok(Product::new(
        parse_arg("id", &args[0])?,
        &args[1],
        parse_arg("weight", &args[2])?,
        &args[3],
        &args[4],
        parse_arg("units sold", &args[5])?,
        parse_arg("price", &args[6])?,
    ))
}


/// Prints a table with the given rows under the standard header.
fn print_table<'a>(rows: impl IntoIterator<Item = &'a Product>) {
    println!("{}", product::table_header());
    for product in rows {
        println!("{}", product);
    }
}


/// Reports a rejected catalog operation in the REPL's wording.
fn report(e: &SalesError) {
    match e {
        SalesError::DuplicateKey { .. } => println!("Product ID already exists."),
        SalesError::NotFound { .. } => println!("Not found."),
        SalesError::InsufficientHistory { .. } => println!("Not enough past data."),
        other => println!("ERR: {}", other),
    }
}


/// Handles a single user command and returns whether the REPL should continue or exit.
///
/// - Only supported commands will operate - Any other input: Prints an error and redisplays the syntax.
///
/// Returns:
/// - `CommandResult::Continue` if the loop should keep running.
/// - `CommandResult::Exit` if the user requested termination.
///
/// The `proper_syntax` argument is displayed in error messages to guide the user.
pub fn handle_command(cmd: &str, args: &[String], proper_syntax: &str, session: &mut Session) -> CommandResult {
    match cmd {

        // Add command format: ADD <id> <name> <weight> <color> <location> <units> <price>
        // or ADD <id> | <name> | <weight> | <color> | <location> | <units> | <price>
        "ADD" => {
            match add_fields(args) {
                None => println!("ERR: ADD requires <id> <name> <weight> <color> <location> <units> <price>"),
                Some(fields) => match product_from_args(&fields).and_then(|product| session.add_product(product)) {
                    Ok(()) => println!("Added."),
                    Err(e) => report(&e),
                },
            }
            CommandResult::Continue
        }

        // Get command format: GET <id>
        "GET" => {
            if args.len() != 1 {
                println!("ERR: GET requires a product id");
            } else {
                match parse_arg("id", &args[0]).and_then(|id| session.find(id)) {
                    Ok(product) => print_table([product]),
                    Err(e) => report(&e),
                }
            }
            CommandResult::Continue
        }

        // List command format: LIST
        "LIST" => {
            if !args.is_empty() {
                println!("ERR: LIST does not take any arguments");
            } else {
                print_table(session.list());
            }
            CommandResult::Continue
        }

        // Update command format: UPDATE <id> <units> <past_sale>
        "UPDATE" => {
            if args.len() != 3 {
                println!("ERR: UPDATE requires <id> <units> <past_sale>");
            } else {
                let update = parse_arg("id", &args[0]).and_then(|id| {
                    let units = parse_arg("units sold", &args[1])?;
                    let sale = parse_arg("past sale", &args[2])?;
                    session.update_sales(id, units, sale)
                });
                match update {
                    Ok(()) => println!("Updated."),
                    Err(e) => report(&e),
                }
            }
            CommandResult::Continue
        }

        // Delete command format: DEL <id>
        "DEL" => {
            if args.len() != 1 {
                println!("ERR: DEL requires a product id");
            } else {
                match parse_arg("id", &args[0]).and_then(|id| session.remove(id)) {
                    Ok(removed) => println!("Deleted {} ({}).", removed.id, removed.name),
                    Err(e) => report(&e),
                }
            }
            CommandResult::Continue
        }

        // Insights command format: INSIGHTS
        "INSIGHTS" => {
            let insights = session.insights();
            println!("Total Revenue: {:.2}", insights.total_revenue);
            if let Some(best) = insights.best_seller {
                println!("Best Seller: {} ({} units)", best.name, best.units_sold);
            }
            if let Some(least) = insights.least_seller {
                println!("Least Seller: {} ({} units)", least.name, least.units_sold);
            }
            CommandResult::Continue
        }

        // Location command format: LOCATION <location>
        "LOCATION" => {
            match location_arg(args) {
                None => println!("ERR: LOCATION requires a location"),
                Some(location) => {
                    let summary = session.location_summary(&location);
                    println!(
                        "Location: {} | Units: {} | Revenue: {:.2}",
                        location, summary.units, summary.revenue
                    );
                }
            }
            CommandResult::Continue
        }

        // Predict command format: PREDICT <id>
        "PREDICT" => {
            if args.len() != 1 {
                println!("ERR: PREDICT requires a product id");
            } else {
                match parse_arg("id", &args[0]).and_then(|id| session.predict(id)) {
                    Ok(units) => println!("Predicted next-month sales: {} units", units),
                    Err(e) => report(&e),
                }
            }
            CommandResult::Continue
        }

        "SAVE" => {
            match session.save() {
                Ok(count) => println!("Saved {} products to {}.", count, session.data_file().display()),
                Err(e) => {
                    error!(error = %e, "save failed");
                    println!("ERR: {}", e);
                }
            }
            CommandResult::Continue
        }

        "HELP" => {
            println!("{}", proper_syntax);
            CommandResult::Continue
        }

        // Exit command
        "EXIT" | "QUIT" => {
            println!("Exiting...");
            CommandResult::Exit
        }

        // Empty input
        "" => {
            println!("Enter a command.");
            CommandResult::Continue
        }

        // Everything else will be noted and returned as an error
        _ => {
            println!("ERROR: command '{}' not handled", cmd);
            println!("{}", proper_syntax);
            CommandResult::Continue
        }
    }
}



// =================================================================
// lib.rs Unit tests
// =================================================================
