use std::str::FromStr;

use rust_decimal::Decimal;

use common::{
    CategoryRequest, CreateGameRequest, PlatformRequest, Privilege, UpdateGameRequest,
    UpdateUserRequest,
};

use super::fakes::{catalog, FakeDb};
use super::{console, lines, output};
use crate::menu::Action;
use crate::screens::{main_summary, run_action};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn add_game_passes_exactly_the_entered_fields() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&[
        "Portal",
        "2007",
        "A puzzle-platform game",
        "0",
        "1",
        "",
    ]));
    run_action(Action::AddGame, &catalog, &mut c).unwrap();

    assert_eq!(
        *db.game_adds.borrow(),
        vec![CreateGameRequest {
            name: "Portal".to_string(),
            release_year: 2007,
            description: "A puzzle-platform game".to_string(),
            production_cost: Decimal::ZERO,
            category_id: 1,
            image_url: None,
        }]
    );
    assert!(output(c).contains("Game 'Portal' added with ID 2!"));
}

#[test]
fn add_game_retries_each_field_until_valid() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&[
        "Po",
        "Portal 2",
        "1985",
        "2011",
        "short",
        "Cooperative portal puzzles",
        "-1",
        "1000000.50",
        "9999",
        "1",
        "www.example.com/p2.jpg",
        "https://example.com/p2.jpg",
    ]));
    run_action(Action::AddGame, &catalog, &mut c).unwrap();

    let adds = db.game_adds.borrow();
    assert_eq!(adds.len(), 1);
    assert_eq!(adds[0].name, "Portal 2");
    assert_eq!(adds[0].release_year, 2011);
    assert_eq!(adds[0].production_cost, dec("1000000.50"));
    assert_eq!(adds[0].image_url.as_deref(), Some("https://example.com/p2.jpg"));
}

#[test]
fn blank_update_keeps_every_field_and_still_updates() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let before = db.games.borrow()[0].clone();

    let mut c = console(&lines(&["1", "", "", "", "", ""]));
    run_action(Action::UpdateGame, &catalog, &mut c).unwrap();

    assert_eq!(
        *db.game_updates.borrow(),
        vec![(
            1,
            UpdateGameRequest {
                name: before.name.clone(),
                release_year: before.release_year,
                description: before.description.clone(),
                production_cost: before.production_cost,
                image_url: before.image_url.clone(),
            }
        )]
    );
    assert_eq!(db.games.borrow()[0], before);
    assert!(output(c).contains("Game updated successfully!"));
}

#[test]
fn invalid_update_values_fall_back_to_current() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);

    let mut c = console(&lines(&["1", "T", "1800", "", "-3", "clear"]));
    run_action(Action::UpdateGame, &catalog, &mut c).unwrap();

    let game = db.games.borrow()[0].clone();
    assert_eq!(game.name, "Tetris");
    assert_eq!(game.release_year, 1990);
    assert_eq!(game.production_cost, dec("50000"));
    assert_eq!(game.image_url, None);
    assert_eq!(output(c).matches("Keeping current value.").count(), 3);
}

#[test]
fn add_user_stores_a_hash_not_the_password() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["admin", "newbie", "secret1", "moderator"]));
    run_action(Action::AddUser, &catalog, &mut c).unwrap();

    let adds = db.user_adds.borrow();
    assert_eq!(adds.len(), 1);
    assert_eq!(adds[0].username, "newbie");
    assert_eq!(adds[0].privilege, Privilege::Moderator);
    assert!(adds[0].password_hash.starts_with("$argon2"));
    assert!(!adds[0].password_hash.contains("secret1"));

    let out = output(c);
    let duplicate = out.find("already exists").unwrap();
    let password = out.find("Enter password").unwrap();
    assert!(duplicate < password);
}

#[test]
fn blank_user_update_sends_the_current_values() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let before = db.users.borrow()[0].clone();

    let mut c = console(&lines(&["1", "", "  "]));
    run_action(Action::UpdateUser, &catalog, &mut c).unwrap();

    assert_eq!(
        *db.user_updates.borrow(),
        vec![(
            1,
            UpdateUserRequest {
                username: before.username.clone(),
                privilege: before.privilege,
            }
        )]
    );
    assert_eq!(db.users.borrow()[0], before);
    assert!(output(c).contains("User updated successfully!"));
}

#[test]
fn whitespace_username_is_asked_again() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["   ", "newbie", "secret1", "user"]));
    run_action(Action::AddUser, &catalog, &mut c).unwrap();

    assert_eq!(db.user_adds.borrow()[0].username, "newbie");
    assert!(output(c).contains("Username must be 3-50 characters!"));
}

#[test]
fn user_is_deleted_after_confirmation() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "y"]));
    run_action(Action::DeleteUser, &catalog, &mut c).unwrap();

    assert!(db.users.borrow().is_empty());
    assert!(output(c).contains("User deleted successfully!"));
}

#[test]
fn privilege_update_is_strict() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "", "user"]));
    run_action(Action::UpdateUserPrivilege, &catalog, &mut c).unwrap();
    assert_eq!(db.users.borrow()[0].privilege, Privilege::User);
}

#[test]
fn blank_category_update_sends_the_current_values() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let before = db.categories.borrow()[0].clone();

    let mut c = console(&lines(&["1", "", ""]));
    run_action(Action::UpdateCategory, &catalog, &mut c).unwrap();

    assert_eq!(
        *db.category_updates.borrow(),
        vec![(
            1,
            CategoryRequest {
                name: before.name.clone(),
                description: before.description.clone(),
            }
        )]
    );
    assert_eq!(db.categories.borrow()[0], before);
    assert!(output(c).contains("Category updated successfully!"));
}

#[test]
fn whitespace_game_name_is_asked_again() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&[
        "    ",
        "Portal",
        "2007",
        "A puzzle-platform game",
        "0",
        "1",
        "",
    ]));
    run_action(Action::AddGame, &catalog, &mut c).unwrap();

    assert_eq!(db.game_adds.borrow()[0].name, "Portal");
    assert!(output(c).contains("Text must be 3-255 characters!"));
}

#[test]
fn category_with_games_is_not_deleted() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console("1\n");
    run_action(Action::DeleteCategory, &catalog, &mut c).unwrap();

    assert_eq!(db.categories.borrow().len(), 1);
    let out = output(c);
    assert!(out.contains("Tetris"));
    assert!(out.contains("1 game(s) still belong to it"));
}

#[test]
fn category_guard_holds_when_names_cannot_load() {
    let db = FakeDb::seeded();
    db.categories_unlisted.set(true);
    let catalog = catalog(&db);
    let mut c = console("1\n");
    run_action(Action::DeleteCategory, &catalog, &mut c).unwrap();

    assert_eq!(db.categories.borrow().len(), 1);
    let out = output(c);
    assert!(out.contains("Tetris"));
    assert!(out.contains("Unknown"));
    assert!(out.contains("1 game(s) still belong to it"));
}

#[test]
fn empty_category_is_deleted_after_confirmation() {
    let db = FakeDb::seeded();
    db.games.borrow_mut().clear();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "y"]));
    run_action(Action::DeleteCategory, &catalog, &mut c).unwrap();
    assert!(db.categories.borrow().is_empty());
}

#[test]
fn declined_delete_changes_nothing() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "n"]));
    run_action(Action::DeleteGame, &catalog, &mut c).unwrap();
    assert_eq!(db.games.borrow().len(), 1);
    assert!(output(c).contains("Cancelled."));
}

#[test]
fn store_failure_is_reported_and_screen_returns() {
    let db = FakeDb::seeded();
    db.broken.set(true);
    let catalog = catalog(&db);
    let mut c = console(&lines(&["Strategy", "Games about thinking ahead"]));
    run_action(Action::AddCategory, &catalog, &mut c).unwrap();

    let out = output(c);
    assert!(out.contains("Failed to add category: the database connection was lost"));
    assert_eq!(db.categories.borrow().len(), 1);
}

#[test]
fn review_mark_out_of_range_is_asked_again() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "1", "1", "Great game", "11", "9"]));
    run_action(Action::AddReview, &catalog, &mut c).unwrap();

    let reviews = db.reviews.borrow();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].mark, 9);
    assert_eq!(reviews[0].text, "Great game");
}

#[test]
fn review_update_keeps_mark_on_blank() {
    let db = FakeDb::seeded();
    db.add_review(1, 1, 1, 6);
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "Better on a second look", ""]));
    run_action(Action::UpdateReview, &catalog, &mut c).unwrap();

    let review = db.reviews.borrow()[0].clone();
    assert_eq!(review.text, "Better on a second look");
    assert_eq!(review.mark, 6);
}

#[test]
fn game_reviews_show_average_mark() {
    let db = FakeDb::seeded();
    db.add_review(1, 1, 1, 7);
    db.add_review(1, 1, 1, 8);
    let catalog = catalog(&db);
    let mut c = console("1\n");
    run_action(Action::ShowGameReviews, &catalog, &mut c).unwrap();

    let out = output(c);
    assert!(out.contains("Average mark: 7.5 from 2 review(s)"));
}

#[test]
fn user_and_platform_review_listings_filter() {
    let db = FakeDb::seeded();
    db.add_review(1, 1, 1, 7);
    let catalog = catalog(&db);

    let mut c = console("1\n");
    run_action(Action::ShowUserReviews, &catalog, &mut c).unwrap();
    assert!(output(c).contains("review 1"));

    let mut c = console("1\n");
    run_action(Action::ShowPlatformReviews, &catalog, &mut c).unwrap();
    assert!(output(c).contains("REVIEWS ON PLATFORM 1"));
}

#[test]
fn platform_is_added_with_the_next_id() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["Switch", "Console", "Nintendo hybrid console"]));
    run_action(Action::AddPlatform, &catalog, &mut c).unwrap();

    let platform = db.platforms.borrow()[1].clone();
    assert_eq!(platform.id, 2);
    assert_eq!(platform.name, "Switch");
    assert_eq!(platform.kind, "Console");
    assert_eq!(platform.description, "Nintendo hybrid console");
    assert!(output(c).contains("Platform added with ID 2!"));
}

#[test]
fn blank_platform_update_sends_the_current_values() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let before = db.platforms.borrow()[0].clone();

    let mut c = console(&lines(&["1", "", "", ""]));
    run_action(Action::UpdatePlatform, &catalog, &mut c).unwrap();

    assert_eq!(
        *db.platform_updates.borrow(),
        vec![(
            1,
            PlatformRequest {
                name: before.name.clone(),
                kind: before.kind.clone(),
                description: before.description.clone(),
            }
        )]
    );
    assert_eq!(db.platforms.borrow()[0], before);
    assert!(output(c).contains("Platform updated successfully!"));
}

#[test]
fn platform_is_deleted_after_confirmation() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "y"]));
    run_action(Action::DeletePlatform, &catalog, &mut c).unwrap();

    assert!(db.platforms.borrow().is_empty());
    assert!(output(c).contains("Platform deleted successfully!"));
}

#[test]
fn review_is_deleted_after_confirmation() {
    let db = FakeDb::seeded();
    db.add_review(1, 1, 1, 6);
    db.add_review(1, 1, 1, 9);
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "y"]));
    run_action(Action::DeleteReview, &catalog, &mut c).unwrap();

    let remaining: Vec<i32> = db.reviews.borrow().iter().map(|r| r.id).collect();
    assert_eq!(remaining, vec![2]);
    assert!(output(c).contains("Review deleted successfully!"));
}

#[test]
fn link_then_reprice_then_unlink() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);

    let mut c = console(&lines(&["1", "1", "2021-13-01", "2021-05-01", "19.99"]));
    run_action(Action::LinkGame, &catalog, &mut c).unwrap();
    assert_eq!(db.links.borrow().len(), 1);
    assert_eq!(db.links.borrow()[0].price, dec("19.99"));

    let mut c = console(&lines(&["1", "1", "9.99"]));
    run_action(Action::UpdateLinkPrice, &catalog, &mut c).unwrap();
    assert_eq!(db.links.borrow()[0].price, dec("9.99"));

    let mut c = console("1\n");
    run_action(Action::ShowPlatformGames, &catalog, &mut c).unwrap();
    assert!(output(c).contains("GAMES ON PLATFORM 1"));

    let mut c = console(&lines(&["1", "1"]));
    run_action(Action::UnlinkGame, &catalog, &mut c).unwrap();
    assert!(db.links.borrow().is_empty());
}

#[test]
fn repricing_a_missing_link_reports_failure() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["1", "1", "5"]));
    run_action(Action::UpdateLinkPrice, &catalog, &mut c).unwrap();
    assert!(output(c).contains("Failed to update price: no record was changed"));
}

#[test]
fn game_platform_listing() {
    let db = FakeDb::seeded();
    db.link(1, 1, dec("4.99"));
    let catalog = catalog(&db);
    let mut c = console("1\n");
    run_action(Action::ShowGamePlatforms, &catalog, &mut c).unwrap();
    let out = output(c);
    assert!(out.contains("PLATFORMS FOR GAME 1"));
    assert!(out.contains("2020-01-01"));
    assert!(out.contains("$4.99"));
}

#[test]
fn statistics_lists_per_game_totals() {
    let db = FakeDb::seeded();
    db.add_review(1, 1, 1, 10);
    let catalog = catalog(&db);
    let mut c = console("");
    run_action(Action::Statistics, &catalog, &mut c).unwrap();
    let out = output(c);
    assert!(out.contains("Reviews:"));
    let row = out.lines().find(|l| l.starts_with("1 ") && l.contains("Tetris")).unwrap();
    assert!(row.contains("10"));
}

#[test]
fn main_summary_counts_rows() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut out = Vec::new();
    main_summary(&catalog, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Games:"));
    assert!(text.contains("Platforms:"));
}
