use colored::*;

use warbot::render::display_name;
use warbot::Roster;

/// One roster line as shown on the terminal
pub fn format_entry(index: usize, name: &str, alive: bool) -> ColoredString {
    let line = format!("{:>3}. {}", index + 1, display_name(name));
    if alive {
        line.normal()
    } else {
        line.red().strikethrough()
    }
}

pub fn print_roster(roster: &Roster) {
    if roster.is_empty() {
        println!("{}", "The roster is empty".yellow());
        return;
    }

    for (id, participant) in roster.iter() {
        println!("{}", format_entry(id.index(), participant.name(), participant.is_alive()));
    }

    println!();
    println!(
        "{}",
        format!("{} of {} alive", roster.alive_count(), roster.len()).bright_blue().bold()
    );
}
