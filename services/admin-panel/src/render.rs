//! Table and header rendering shared by the prompts and the screens.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use common::{status_label, truncate, Category, Game, GamePlatform, Platform, Review, User};

use crate::error::store_error_message;
use crate::repositories::Catalog;
use crate::validation::EntityKind;

const HEAVY_RULE: &str = "════════════════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "────────────────────────────────────────────────────────────────";

pub fn header(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out, " {}", title.if_supports_color(Stdout, |t| t.bold()))?;
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out)
}

fn table_title(out: &mut impl Write, title: &str, columns: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out, "  {}", title.if_supports_color(Stdout, |t| t.bold()))?;
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out, "{}", columns)?;
    writeln!(out, "{}", LIGHT_RULE)
}

pub fn notice(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "[i] {}", message)
}

pub fn users_table(out: &mut impl Write, users: &[User]) -> io::Result<()> {
    if users.is_empty() {
        return notice(out, "No users in database!");
    }
    table_title(
        out,
        "AVAILABLE USERS",
        &format!("{:<5}{:<22}{:<12}{}", "ID", "Username", "Privilege", "Status"),
    )?;
    for user in users {
        writeln!(
            out,
            "{:<5}{:<22}{:<12}{}",
            user.id,
            truncate(&user.username, 21),
            user.privilege,
            status_label(user.is_active)
        )?;
    }
    writeln!(out)
}

pub fn games_table(out: &mut impl Write, games: &[Game], categories: &[Category]) -> io::Result<()> {
    if games.is_empty() {
        return notice(out, "No games in database!");
    }
    table_title(
        out,
        "AVAILABLE GAMES",
        &format!(
            "{:<5}{:<25}{:<6}{:<16}{:<12}{:<7}{}",
            "ID", "Name", "Year", "Category", "Cost", "Image", "Status"
        ),
    )?;
    for game in games {
        let category = categories
            .iter()
            .find(|c| c.id == game.category_id)
            .map(|c| truncate(&c.name, 15))
            .unwrap_or_else(|| "Unknown".to_string());
        writeln!(
            out,
            "{:<5}{:<25}{:<6}{:<16}{:<12}{:<7}{}",
            game.id,
            truncate(&game.name, 24),
            game.release_year,
            category,
            format!("${}", game.production_cost),
            if game.image_url.is_some() { "Yes" } else { "No" },
            status_label(game.is_active)
        )?;
    }
    writeln!(out)
}

pub fn game_details(out: &mut impl Write, game: &Game) -> io::Result<()> {
    writeln!(out, "[i] Current game information:")?;
    writeln!(out, "    Name: {}", game.name)?;
    writeln!(out, "    Year: {}", game.release_year)?;
    writeln!(out, "    Description: {}", truncate(&game.description, 50))?;
    writeln!(out, "    Cost: ${}", game.production_cost)?;
    writeln!(
        out,
        "    Image URL: {}",
        game.image_url.as_deref().unwrap_or("Not set")
    )?;
    writeln!(out)
}

pub fn categories_table(out: &mut impl Write, categories: &[Category]) -> io::Result<()> {
    if categories.is_empty() {
        return notice(out, "No categories in database!");
    }
    table_title(
        out,
        "AVAILABLE CATEGORIES",
        &format!("{:<5}{:<22}{}", "ID", "Category Name", "Description"),
    )?;
    for category in categories {
        writeln!(
            out,
            "{:<5}{:<22}{}",
            category.id,
            truncate(&category.name, 21),
            truncate(&category.description, 40)
        )?;
    }
    writeln!(out)
}

pub fn platforms_table(out: &mut impl Write, platforms: &[Platform]) -> io::Result<()> {
    if platforms.is_empty() {
        return notice(out, "No platforms in database!");
    }
    table_title(
        out,
        "AVAILABLE PLATFORMS",
        &format!("{:<5}{:<22}{:<16}{}", "ID", "Platform Name", "Type", "Description"),
    )?;
    for platform in platforms {
        writeln!(
            out,
            "{:<5}{:<22}{:<16}{}",
            platform.id,
            truncate(&platform.name, 21),
            truncate(&platform.kind, 15),
            truncate(&platform.description, 30)
        )?;
    }
    writeln!(out)
}

pub fn links_table(out: &mut impl Write, title: &str, links: &[GamePlatform]) -> io::Result<()> {
    if links.is_empty() {
        return notice(out, "No game/platform links found.");
    }
    table_title(
        out,
        title,
        &format!("{:<10}{:<13}{:<14}{}", "Game ID", "Platform ID", "Released", "Price"),
    )?;
    for link in links {
        writeln!(
            out,
            "{:<10}{:<13}{:<14}${}",
            link.game_id,
            link.platform_id,
            link.release_date.format("%Y-%m-%d").to_string(),
            link.price
        )?;
    }
    writeln!(out)
}

pub fn reviews_table(out: &mut impl Write, title: &str, reviews: &[Review]) -> io::Result<()> {
    if reviews.is_empty() {
        return notice(out, "No reviews found.");
    }
    table_title(
        out,
        title,
        &format!(
            "{:<5}{:<9}{:<9}{:<10}{:<6}{}",
            "ID", "User", "Game", "Platform", "Mark", "Review Text"
        ),
    )?;
    for review in reviews {
        writeln!(
            out,
            "{:<5}{:<9}{:<9}{:<10}{:<6}{}",
            review.id,
            review.user_id,
            review.game_id,
            review.platform_id,
            review.mark,
            truncate(&review.text, 40)
        )?;
    }
    writeln!(out)
}

pub fn failure(out: &mut impl Write, what: &str, detail: &str) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        format!("✗ Failed to {}: {}", what, detail).if_supports_color(Stdout, |t| t.red())
    )
}

pub fn success(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        format!("[✓] {}", message).if_supports_color(Stdout, |t| t.green())
    )
}

pub fn menu(out: &mut impl Write, labels: &[&str], selected: usize) -> io::Result<()> {
    for (i, label) in labels.iter().enumerate() {
        if i == selected {
            let line = format!("▶ {}. {} ◀", i + 1, label);
            writeln!(out, "{}", line.if_supports_color(Stdout, |t| t.cyan()))?;
        } else {
            writeln!(out, "  {}. {}", i + 1, label)?;
        }
    }
    Ok(())
}

pub fn counts(out: &mut impl Write, rows: &[(&str, i64)]) -> io::Result<()> {
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out, "  {}", "STATISTICS".if_supports_color(Stdout, |t| t.bold()))?;
    writeln!(out, "{}", HEAVY_RULE)?;
    for (label, count) in rows {
        writeln!(out, "  {:<14}{}", format!("{}:", label), count)?;
    }
    writeln!(out, "{}", HEAVY_RULE)?;
    writeln!(out)
}

/// Prints the current rows of `kind` so the operator can see which ids are valid.
pub fn entity_listing(out: &mut impl Write, catalog: &Catalog, kind: EntityKind) -> io::Result<()> {
    let result = match kind {
        EntityKind::User => catalog.users.get_all().map(|users| users_table(out, &users)),
        EntityKind::Game => catalog.games.get_all().and_then(|games| {
            let categories = catalog.categories.get_all()?;
            Ok(games_table(out, &games, &categories))
        }),
        EntityKind::Platform => catalog
            .platforms
            .get_all()
            .map(|platforms| platforms_table(out, &platforms)),
        EntityKind::Category => catalog
            .categories
            .get_all()
            .map(|categories| categories_table(out, &categories)),
        EntityKind::Review => catalog
            .reviews
            .get_all()
            .map(|reviews| reviews_table(out, "ALL REVIEWS", &reviews)),
    };
    match result {
        Ok(written) => written,
        Err(e) => failure(
            out,
            &format!("list {}s", kind.label()),
            &store_error_message(&e),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Privilege;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_user_list_prints_notice() {
        let text = rendered(|out| users_table(out, &[]));
        assert!(text.contains("No users in database!"));
    }

    #[test]
    fn user_rows_show_id_name_and_privilege() {
        let users = vec![User {
            id: 1,
            username: "admin".to_string(),
            password_hash: "$argon2id$...".to_string(),
            privilege: Privilege::Admin,
            is_active: true,
        }];
        let text = rendered(|out| users_table(out, &users));
        let row = text.lines().find(|l| l.starts_with("1 ")).unwrap();
        assert!(row.contains("admin"));
        assert!(row.contains("Active"));
        assert!(!text.contains("argon2"));
    }

    #[test]
    fn game_rows_resolve_category_names() {
        let games = vec![Game {
            id: 4,
            name: "Portal".to_string(),
            release_year: 2007,
            description: "A puzzle-platform game".to_string(),
            production_cost: rust_decimal::Decimal::ZERO,
            category_id: 2,
            image_url: None,
            is_active: true,
        }];
        let categories = vec![Category {
            id: 2,
            name: "Puzzle".to_string(),
            description: "Brain teasers".to_string(),
        }];
        let text = rendered(|out| games_table(out, &games, &categories));
        let row = text.lines().find(|l| l.starts_with("4 ")).unwrap();
        assert!(row.contains("Portal"));
        assert!(row.contains("Puzzle"));
        assert!(row.contains("2007"));

        let orphaned = rendered(|out| games_table(out, &games, &[]));
        assert!(orphaned.contains("Unknown"));
    }

    #[test]
    fn menu_marks_only_the_selected_entry() {
        let text = rendered(|out| menu(out, &["Show", "Add", "Back"], 1));
        let marked: Vec<&str> = text.lines().filter(|l| l.contains('▶')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("2. Add"));
    }
}
