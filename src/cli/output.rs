//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::models::{Identity, Role};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Print the identity held by the current session
pub fn print_identity(identity: &Identity) {
    println!("{}", "Session".bold().underline());
    println!();
    println!("  {} {}", "Username:".bold(), identity.username);
    println!("  {} {}", "Name:".bold(), identity.full_name);
    println!("  {} {}", "Role:".bold(), identity.role.to_string().cyan());
    println!("  {} {}", "Department:".bold(), identity.department);

    if let Some(semester) = identity.semester {
        println!("  {} {}", "Semester:".bold(), semester);
    }
}

/// Print a table of directory users
pub fn print_user_table(users: &[Identity]) {
    if users.is_empty() {
        info("No users found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Username").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Department").fg(Color::Cyan),
            Cell::new("Semester").fg(Color::Cyan),
        ]);

    for user in users {
        let role_color = match user.role {
            Role::Admin => Color::Red,
            Role::Staff => Color::Yellow,
            Role::Student => Color::Green,
        };

        let semester = user
            .semester
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&user.username),
            Cell::new(&user.full_name),
            Cell::new(user.role.to_string()).fg(role_color),
            Cell::new(&user.department),
            Cell::new(semester),
        ]);
    }

    println!("{table}");
}
