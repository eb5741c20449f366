//! Interactive branch inspector.
//!
//! Starts at the initial state and prints its numbered successor states,
//! one state line plus a resource-detail line each. Type an index to
//! descend into that branch; a negative index (or end of input) exits.

use std::io::{self, BufRead, Write};

use cliptimizer::branch::{self, Goal};
use cliptimizer::game::state::State;

fn main() {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut state = State::new();

    loop {
        let successors = branch::branches(&state, Goal::Time(1e99));
        if successors.is_empty() {
            println!("no further branches");
            println!("{}", state);
            break;
        }
        for (i, successor) in successors.iter().enumerate() {
            println!("{:2}) {}", i, successor);
            println!("    {}", successor.detail());
        }

        print!("> ");
        io::stdout().flush().expect("failed to flush stdout");
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let choice: i64 = match line.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("expected a branch index");
                continue;
            }
        };
        if choice < 0 {
            break;
        }
        let index = choice as usize;
        if index >= successors.len() {
            eprintln!("branch index out of range");
            continue;
        }
        state = successors.into_iter().nth(index).expect("index checked above");
    }
}
