use super::fakes::{catalog, FakeDb};
use super::{console, lines, output};
use crate::validation::{identifier_exists, EntityKind};

#[test]
fn unknown_game_id_is_rejected_and_prompt_redisplayed() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    assert!(!identifier_exists(&catalog, EntityKind::Game, 9999));

    let mut c = console(&lines(&["9999", "1"]));
    assert_eq!(c.prompt_identifier(&catalog, EntityKind::Game).unwrap(), 1);

    let out = output(c);
    assert!(out.contains("Game ID 9999 does not exist!"));
    assert_eq!(out.matches("Enter game ID (from list above): ").count(), 2);
    assert!(out.contains("Game ID valid!"));
}

#[test]
fn identifier_prompt_lists_rows_first() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console("1\n");
    c.prompt_identifier(&catalog, EntityKind::Platform).unwrap();

    let out = output(c);
    let table = out.find("AVAILABLE PLATFORMS").unwrap();
    let prompt = out.find("Enter platform ID").unwrap();
    assert!(table < prompt);
}

#[test]
fn non_numeric_id_is_reported_and_discarded() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["abc", "one two", "1"]));
    assert_eq!(c.prompt_identifier(&catalog, EntityKind::User).unwrap(), 1);
    assert_eq!(
        output(c).matches("Invalid input! Please enter a number.").count(),
        2
    );
}

#[test]
fn non_positive_ids_skip_the_lookup() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["0", "-5", "1"]));
    assert_eq!(c.prompt_identifier(&catalog, EntityKind::Category).unwrap(), 1);
    assert_eq!(db.lookups.get(), 1);
}

#[test]
fn every_kind_checks_its_own_repository() {
    let db = FakeDb::seeded();
    db.add_review(1, 1, 1, 8);
    let catalog = catalog(&db);
    for kind in [
        EntityKind::User,
        EntityKind::Game,
        EntityKind::Platform,
        EntityKind::Category,
        EntityKind::Review,
    ] {
        assert!(identifier_exists(&catalog, kind, 1), "{:?}", kind);
        assert!(!identifier_exists(&catalog, kind, 2), "{:?}", kind);
    }
}

#[test]
fn empty_table_still_prompts() {
    let db = FakeDb::new();
    let catalog = catalog(&db);
    let mut c = console("");
    assert!(c.prompt_identifier(&catalog, EntityKind::Review).is_err());
    assert!(output(c).contains("No reviews found."));
}

#[test]
fn duplicate_username_restarts_the_prompt() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["admin", "newbie"]));
    assert_eq!(c.prompt_username(&catalog).unwrap(), "newbie");

    let out = output(c);
    assert!(out.contains("Username 'admin' already exists!"));
    assert_eq!(out.matches("Enter username").count(), 2);
}

#[test]
fn short_username_fails_before_uniqueness() {
    let db = FakeDb::seeded();
    let catalog = catalog(&db);
    let mut c = console(&lines(&["ad", "admin2"]));
    assert_eq!(c.prompt_username(&catalog).unwrap(), "admin2");
    let out = output(c);
    assert!(out.contains("Username must be 3-50 characters!"));
    assert!(!out.contains("already exists"));
}

#[test]
fn password_length_is_the_only_rule() {
    let mut c = console(&lines(&["12345", "123456"]));
    assert_eq!(c.prompt_password().unwrap(), "123456");
}

#[test]
fn renaming_a_user_to_a_taken_name_keeps_the_old_one() {
    let db = FakeDb::seeded();
    db.users.borrow_mut().push(common::User {
        id: 2,
        username: "player".to_string(),
        password_hash: String::new(),
        privilege: common::Privilege::User,
        is_active: true,
    });
    let catalog = catalog(&db);

    let mut c = console("admin\n");
    assert_eq!(c.update_username(&catalog, 2, "player").unwrap(), "player");
    assert!(output(c).contains("Username 'admin' already exists! Keeping current value."));

    let mut c = console("gamer\n");
    assert_eq!(c.update_username(&catalog, 2, "player").unwrap(), "gamer");
}
