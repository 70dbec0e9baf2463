//! One handler per menu action.
//!
//! Handlers never return a store failure: every `StoreError` is printed as a
//! failure line for the screen and control goes back to the menu. Only a
//! lost terminal ends a handler early.

use std::io::{self, BufRead, Write};

use common::{
    CategoryRequest, CreateGameRequest, CreateReviewRequest, CreateUserRequest, GamePlatform,
    PlatformRequest, UpdateGameRequest, UpdateReviewRequest, UpdateUserRequest,
};

use crate::error::{store_error_message, PromptError, StoreError};
use crate::menu::Action;
use crate::password;
use crate::prompt::Console;
use crate::render;
use crate::repositories::Catalog;
use crate::validation::{self, EntityKind};

pub fn run_action<R: BufRead, W: Write>(
    action: Action,
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    log::debug!("running {:?}", action);
    match action {
        Action::ShowUsers => show_all(catalog, console, "All Users", EntityKind::User),
        Action::AddUser => add_user(catalog, console),
        Action::UpdateUser => update_user(catalog, console),
        Action::UpdateUserPrivilege => update_user_privilege(catalog, console),
        Action::DeleteUser => delete_user(catalog, console),

        Action::ShowGames => show_all(catalog, console, "All Games", EntityKind::Game),
        Action::AddGame => add_game(catalog, console),
        Action::UpdateGame => update_game(catalog, console),
        Action::DeleteGame => delete_game(catalog, console),

        Action::ShowCategories => {
            show_all(catalog, console, "All Categories", EntityKind::Category)
        }
        Action::AddCategory => add_category(catalog, console),
        Action::UpdateCategory => update_category(catalog, console),
        Action::DeleteCategory => delete_category(catalog, console),

        Action::ShowPlatforms => show_all(catalog, console, "All Platforms", EntityKind::Platform),
        Action::AddPlatform => add_platform(catalog, console),
        Action::UpdatePlatform => update_platform(catalog, console),
        Action::DeletePlatform => delete_platform(catalog, console),
        Action::LinkGame => link_game(catalog, console),
        Action::UnlinkGame => unlink_game(catalog, console),
        Action::UpdateLinkPrice => update_link_price(catalog, console),
        Action::ShowGamePlatforms => show_game_platforms(catalog, console),
        Action::ShowPlatformGames => show_platform_games(catalog, console),

        Action::ShowReviews => show_all(catalog, console, "All Reviews", EntityKind::Review),
        Action::AddReview => add_review(catalog, console),
        Action::UpdateReview => update_review(catalog, console),
        Action::DeleteReview => delete_review(catalog, console),
        Action::ShowGameReviews => show_game_reviews(catalog, console),
        Action::ShowUserReviews => show_user_reviews(catalog, console),
        Action::ShowPlatformReviews => show_platform_reviews(catalog, console),

        Action::Statistics => statistics(catalog, console),
    }
}

/// Entity counts shown above the main menu. Failures leave the block out.
pub fn main_summary(catalog: &Catalog, out: &mut impl Write) -> io::Result<()> {
    match entity_counts(catalog) {
        Ok(rows) => render::counts(out, &rows),
        Err(e) => {
            log::warn!("could not load statistics: {}", e);
            Ok(())
        }
    }
}

fn entity_counts(catalog: &Catalog) -> Result<Vec<(&'static str, i64)>, StoreError> {
    Ok(vec![
        ("Games", catalog.games.count()?),
        ("Categories", catalog.categories.count()?),
        ("Users", catalog.users.count()?),
        ("Platforms", catalog.platforms.count()?),
        ("Reviews", catalog.reviews.count()?),
    ])
}

fn failed<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    what: &str,
    err: &StoreError,
) -> Result<(), PromptError> {
    render::failure(console.output(), what, &store_error_message(err))?;
    Ok(())
}

/// Reports the result of a mutation that answers "did a row change".
fn finish<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    what: &str,
    result: Result<bool, StoreError>,
    done: &str,
) -> Result<(), PromptError> {
    match result {
        Ok(true) => render::success(console.output(), done)?,
        Ok(false) => render::failure(console.output(), what, "no record was changed")?,
        Err(e) => failed(console, what, &e)?,
    }
    Ok(())
}

fn keep_values_banner<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<(), PromptError> {
    writeln!(
        console.output(),
        "\n[i] Enter new values (press Enter to keep current value)\n"
    )?;
    Ok(())
}

fn cancelled<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<(), PromptError> {
    render::notice(console.output(), "Cancelled.")?;
    Ok(())
}

fn show_all<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
    title: &str,
    kind: EntityKind,
) -> Result<(), PromptError> {
    render::header(console.output(), title)?;
    render::entity_listing(console.output(), catalog, kind)?;
    Ok(())
}

// ── Users ───────────────────────────────────────────────────────────────────

fn add_user<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Add New User")?;
    let username = console.prompt_username(catalog)?;
    let password = console.prompt_password()?;
    let privilege = console.prompt_privilege()?;

    let password_hash = match password::hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => return failed(console, "add user", &StoreError::from(e)),
    };
    let req = CreateUserRequest {
        username,
        password_hash,
        privilege,
    };
    match catalog.users.add(&req) {
        Ok(id) => render::success(
            console.output(),
            &format!("User '{}' added with ID {}!", req.username, id),
        )?,
        Err(e) => failed(console, "add user", &e)?,
    }
    Ok(())
}

fn update_user<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Update User")?;
    let id = console.prompt_identifier(catalog, EntityKind::User)?;
    let current = match catalog.users.get_by_id(id) {
        Ok(Some(user)) => user,
        Ok(None) => {
            render::failure(console.output(), "update user", "the user no longer exists")?;
            return Ok(());
        }
        Err(e) => return failed(console, "update user", &e),
    };

    keep_values_banner(console)?;
    let username = console.update_username(catalog, id, &current.username)?;
    let privilege = console.update_privilege(current.privilege)?;
    let result = catalog
        .users
        .update(id, &UpdateUserRequest { username, privilege });
    finish(console, "update user", result, "User updated successfully!")
}

fn update_user_privilege<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Update User Privilege")?;
    let id = console.prompt_identifier(catalog, EntityKind::User)?;
    let privilege = console.prompt_privilege()?;
    let result = catalog.users.update_privilege(id, privilege);
    finish(
        console,
        "update privilege",
        result,
        &format!("Privilege of user ID {} set to '{}'!", id, privilege),
    )
}

fn delete_user<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Delete User")?;
    let id = console.prompt_identifier(catalog, EntityKind::User)?;
    if !console.confirm(&format!("Delete user ID {} and all of their reviews?", id))? {
        return cancelled(console);
    }
    let result = catalog.users.delete(id);
    finish(console, "delete user", result, "User deleted successfully!")
}

// ── Games ───────────────────────────────────────────────────────────────────

fn add_game<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Add New Game")?;
    let bounds = validation::GAME_NAME;
    let name = console.prompt_text(
        &format!("Enter game name ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    let release_year = console.prompt_year()?;
    let bounds = validation::GAME_DESCRIPTION;
    let description = console.prompt_text(
        &format!("Enter description ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    let production_cost = console.prompt_amount("production cost")?;
    let category_id = console.prompt_identifier(catalog, EntityKind::Category)?;

    writeln!(console.output(), "\n[i] Image URL examples:")?;
    writeln!(
        console.output(),
        "    - https://cdn.cloudflare.steamstatic.com/steam/apps/730/header.jpg"
    )?;
    writeln!(console.output(), "    - Leave empty for placeholder\n")?;
    let image_url = console.prompt_image_url()?;

    let req = CreateGameRequest {
        name,
        release_year,
        description,
        production_cost,
        category_id,
        image_url,
    };
    match catalog.games.add(&req) {
        Ok(id) => render::success(
            console.output(),
            &format!("Game '{}' added with ID {}!", req.name, id),
        )?,
        Err(e) => failed(console, "add game", &e)?,
    }
    Ok(())
}

fn update_game<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Update Game")?;
    let id = console.prompt_identifier(catalog, EntityKind::Game)?;
    let current = match catalog.games.get_by_id(id) {
        Ok(Some(game)) => game,
        Ok(None) => {
            render::failure(console.output(), "update game", "the game no longer exists")?;
            return Ok(());
        }
        Err(e) => return failed(console, "update game", &e),
    };
    render::game_details(console.output(), &current)?;

    keep_values_banner(console)?;
    let name = console.update_text("name", &current.name, validation::GAME_NAME)?;
    let release_year = console.update_number("release year", current.release_year, |y| {
        validation::validate_year(*y)
    })?;
    let description =
        console.update_text("description", &current.description, validation::GAME_DESCRIPTION)?;
    let production_cost = console.update_number("production cost", current.production_cost, |c| {
        validation::validate_non_negative(*c)
    })?;
    let image_url = console.update_image_url(current.image_url.clone())?;

    let req = UpdateGameRequest {
        name,
        release_year,
        description,
        production_cost,
        image_url,
    };
    let result = catalog.games.update(id, &req);
    finish(console, "update game", result, "Game updated successfully!")
}

fn delete_game<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Delete Game")?;
    let id = console.prompt_identifier(catalog, EntityKind::Game)?;
    if !console.confirm(&format!(
        "Delete game ID {} with its platform links and reviews?",
        id
    ))? {
        return cancelled(console);
    }
    let result = catalog.games.delete(id);
    finish(console, "delete game", result, "Game deleted successfully!")
}

// ── Categories ──────────────────────────────────────────────────────────────

fn add_category<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Add New Category")?;
    let bounds = validation::CATEGORY_NAME;
    let name = console.prompt_text(
        &format!("Enter category name ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    let bounds = validation::CATEGORY_DESCRIPTION;
    let description = console.prompt_text(
        &format!("Enter description ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    match catalog.categories.add(&CategoryRequest { name, description }) {
        Ok(id) => render::success(console.output(), &format!("Category added with ID {}!", id))?,
        Err(e) => failed(console, "add category", &e)?,
    }
    Ok(())
}

fn update_category<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Update Category")?;
    let id = console.prompt_identifier(catalog, EntityKind::Category)?;
    let current = match catalog.categories.get_by_id(id) {
        Ok(Some(category)) => category,
        Ok(None) => {
            render::failure(console.output(), "update category", "the category no longer exists")?;
            return Ok(());
        }
        Err(e) => return failed(console, "update category", &e),
    };

    keep_values_banner(console)?;
    let name = console.update_text("name", &current.name, validation::CATEGORY_NAME)?;
    let description = console.update_text(
        "description",
        &current.description,
        validation::CATEGORY_DESCRIPTION,
    )?;
    let result = catalog
        .categories
        .update(id, &CategoryRequest { name, description });
    finish(console, "update category", result, "Category updated successfully!")
}

/// A category that still has games is left alone and its games are listed.
fn delete_category<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Delete Category")?;
    let id = console.prompt_identifier(catalog, EntityKind::Category)?;
    let games = match catalog.games.get_by_category(id) {
        Ok(games) => games,
        Err(e) => return failed(console, "delete category", &e),
    };
    if !games.is_empty() {
        let categories = match catalog.categories.get_all() {
            Ok(categories) => categories,
            Err(e) => {
                log::warn!("could not load category names: {}", e);
                Vec::new()
            }
        };
        render::games_table(console.output(), &games, &categories)?;
        render::failure(
            console.output(),
            "delete category",
            &format!("{} game(s) still belong to it", games.len()),
        )?;
        return Ok(());
    }
    if !console.confirm(&format!("Delete category ID {}?", id))? {
        return cancelled(console);
    }
    let result = catalog.categories.delete(id);
    finish(console, "delete category", result, "Category deleted successfully!")
}

// ── Platforms ───────────────────────────────────────────────────────────────

fn add_platform<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Add New Platform")?;
    let bounds = validation::PLATFORM_NAME;
    let name = console.prompt_text(
        &format!("Enter platform name ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    let bounds = validation::PLATFORM_TYPE;
    let kind = console.prompt_text(
        &format!("Enter platform type ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    let bounds = validation::PLATFORM_DESCRIPTION;
    let description = console.prompt_text(
        &format!("Enter description ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    let req = PlatformRequest {
        name,
        kind,
        description,
    };
    match catalog.platforms.add(&req) {
        Ok(id) => render::success(console.output(), &format!("Platform added with ID {}!", id))?,
        Err(e) => failed(console, "add platform", &e)?,
    }
    Ok(())
}

fn update_platform<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Update Platform")?;
    let id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    let current = match catalog.platforms.get_by_id(id) {
        Ok(Some(platform)) => platform,
        Ok(None) => {
            render::failure(console.output(), "update platform", "the platform no longer exists")?;
            return Ok(());
        }
        Err(e) => return failed(console, "update platform", &e),
    };

    keep_values_banner(console)?;
    let name = console.update_text("name", &current.name, validation::PLATFORM_NAME)?;
    let kind = console.update_text("type", &current.kind, validation::PLATFORM_TYPE)?;
    let description = console.update_text(
        "description",
        &current.description,
        validation::PLATFORM_DESCRIPTION,
    )?;
    let req = PlatformRequest {
        name,
        kind,
        description,
    };
    let result = catalog.platforms.update(id, &req);
    finish(console, "update platform", result, "Platform updated successfully!")
}

fn delete_platform<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Delete Platform")?;
    let id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    if !console.confirm(&format!(
        "Delete platform ID {} with its game links and reviews?",
        id
    ))? {
        return cancelled(console);
    }
    let result = catalog.platforms.delete(id);
    finish(console, "delete platform", result, "Platform deleted successfully!")
}

fn link_game<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Link Game to Platform")?;
    let game_id = console.prompt_identifier(catalog, EntityKind::Game)?;
    let platform_id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    let release_date = console.prompt_release_date()?;
    let price = console.prompt_amount("price")?;
    let link = GamePlatform {
        game_id,
        platform_id,
        release_date,
        price,
    };
    let result = catalog.platforms.link_game(&link);
    finish(
        console,
        "link game",
        result,
        &format!("Game ID {} linked to platform ID {}!", game_id, platform_id),
    )
}

fn unlink_game<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Unlink Game from Platform")?;
    let game_id = console.prompt_identifier(catalog, EntityKind::Game)?;
    let platform_id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    let result = catalog.platforms.unlink_game(game_id, platform_id);
    finish(
        console,
        "unlink game",
        result,
        &format!("Game ID {} unlinked from platform ID {}!", game_id, platform_id),
    )
}

fn update_link_price<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Update Link Price")?;
    let game_id = console.prompt_identifier(catalog, EntityKind::Game)?;
    let platform_id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    let price = console.prompt_amount("new price")?;
    let result = catalog
        .platforms
        .update_link_price(game_id, platform_id, price);
    finish(console, "update price", result, "Price updated successfully!")
}

fn show_game_platforms<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Show Game Platforms")?;
    let game_id = console.prompt_identifier(catalog, EntityKind::Game)?;
    match catalog.platforms.platforms_for_game(game_id) {
        Ok(links) => render::links_table(
            console.output(),
            &format!("PLATFORMS FOR GAME {}", game_id),
            &links,
        )?,
        Err(e) => failed(console, "load platforms", &e)?,
    }
    Ok(())
}

fn show_platform_games<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Show Platform Games")?;
    let platform_id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    match catalog.platforms.games_for_platform(platform_id) {
        Ok(links) => render::links_table(
            console.output(),
            &format!("GAMES ON PLATFORM {}", platform_id),
            &links,
        )?,
        Err(e) => failed(console, "load games", &e)?,
    }
    Ok(())
}

// ── Reviews ─────────────────────────────────────────────────────────────────

fn add_review<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Add Review")?;
    let user_id = console.prompt_identifier(catalog, EntityKind::User)?;
    let game_id = console.prompt_identifier(catalog, EntityKind::Game)?;
    let platform_id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    let bounds = validation::REVIEW_TEXT;
    let text = console.prompt_text(
        &format!("Enter review text ({}-{} characters): ", bounds.min, bounds.max),
        bounds,
    )?;
    let mark = console.prompt_mark()?;
    let req = CreateReviewRequest {
        user_id,
        game_id,
        platform_id,
        text,
        mark,
    };
    match catalog.reviews.add(&req) {
        Ok(id) => render::success(console.output(), &format!("Review added with ID {}!", id))?,
        Err(e) => failed(console, "add review", &e)?,
    }
    Ok(())
}

fn update_review<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Update Review")?;
    let id = console.prompt_identifier(catalog, EntityKind::Review)?;
    let current = match catalog.reviews.get_by_id(id) {
        Ok(Some(review)) => review,
        Ok(None) => {
            render::failure(console.output(), "update review", "the review no longer exists")?;
            return Ok(());
        }
        Err(e) => return failed(console, "update review", &e),
    };

    keep_values_banner(console)?;
    let text = console.update_text("review text", &current.text, validation::REVIEW_TEXT)?;
    let mark = console.update_number("mark", current.mark, |m| validation::validate_mark(*m))?;
    let result = catalog
        .reviews
        .update(id, &UpdateReviewRequest { text, mark });
    finish(console, "update review", result, "Review updated successfully!")
}

fn delete_review<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Delete Review")?;
    let id = console.prompt_identifier(catalog, EntityKind::Review)?;
    if !console.confirm(&format!("Delete review ID {}?", id))? {
        return cancelled(console);
    }
    let result = catalog.reviews.delete(id);
    finish(console, "delete review", result, "Review deleted successfully!")
}

fn show_game_reviews<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "View Game Reviews")?;
    let game_id = console.prompt_identifier(catalog, EntityKind::Game)?;
    let reviews = match catalog.reviews.for_game(game_id) {
        Ok(reviews) => reviews,
        Err(e) => return failed(console, "load reviews", &e),
    };
    render::reviews_table(
        console.output(),
        &format!("GAME REVIEWS (game ID {})", game_id),
        &reviews,
    )?;
    match catalog.reviews.average_mark(game_id) {
        Ok(Some(avg)) => writeln!(
            console.output(),
            "[i] Average mark: {} from {} review(s)",
            avg.normalize(),
            reviews.len()
        )?,
        Ok(None) => {}
        Err(e) => failed(console, "compute average mark", &e)?,
    }
    Ok(())
}

fn show_user_reviews<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "View User Reviews")?;
    let user_id = console.prompt_identifier(catalog, EntityKind::User)?;
    match catalog.reviews.for_user(user_id) {
        Ok(reviews) => render::reviews_table(
            console.output(),
            &format!("REVIEWS BY USER {}", user_id),
            &reviews,
        )?,
        Err(e) => failed(console, "load reviews", &e)?,
    }
    Ok(())
}

fn show_platform_reviews<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "View Platform Reviews")?;
    let platform_id = console.prompt_identifier(catalog, EntityKind::Platform)?;
    match catalog.reviews.for_platform(platform_id) {
        Ok(reviews) => render::reviews_table(
            console.output(),
            &format!("REVIEWS ON PLATFORM {}", platform_id),
            &reviews,
        )?,
        Err(e) => failed(console, "load reviews", &e)?,
    }
    Ok(())
}

// ── Statistics ──────────────────────────────────────────────────────────────

fn statistics<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<(), PromptError> {
    render::header(console.output(), "Statistics")?;
    match entity_counts(catalog) {
        Ok(rows) => render::counts(console.output(), &rows)?,
        Err(e) => return failed(console, "load statistics", &e),
    }

    let games = match catalog.games.get_all() {
        Ok(games) => games,
        Err(e) => return failed(console, "load games", &e),
    };
    if games.is_empty() {
        render::notice(console.output(), "No games in database!")?;
        return Ok(());
    }
    writeln!(console.output(), "{:<5}{:<30}{:<10}{}", "ID", "Game", "Reviews", "Average")?;
    for game in &games {
        let summary = catalog
            .reviews
            .count_for_game(game.id)
            .and_then(|n| Ok((n, catalog.reviews.average_mark(game.id)?)));
        match summary {
            Ok((count, average)) => writeln!(
                console.output(),
                "{:<5}{:<30}{:<10}{}",
                game.id,
                common::truncate(&game.name, 29),
                count,
                average.map(|a| a.normalize().to_string()).unwrap_or_else(|| "-".to_string())
            )?,
            Err(e) => return failed(console, "load review totals", &e),
        }
    }
    Ok(())
}
