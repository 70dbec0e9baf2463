//! Menu navigation as a pure state machine.
//!
//! The machine only tracks which menu is open and which entry is highlighted;
//! running an action is left to the caller, which keeps navigation testable
//! without a terminal or a database.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Main,
    Users,
    Games,
    Categories,
    Platforms,
    Reviews,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ShowUsers,
    AddUser,
    UpdateUser,
    UpdateUserPrivilege,
    DeleteUser,

    ShowGames,
    AddGame,
    UpdateGame,
    DeleteGame,

    ShowCategories,
    AddCategory,
    UpdateCategory,
    DeleteCategory,

    ShowPlatforms,
    AddPlatform,
    UpdatePlatform,
    DeletePlatform,
    LinkGame,
    UnlinkGame,
    UpdateLinkPrice,
    ShowGamePlatforms,
    ShowPlatformGames,

    ShowReviews,
    AddReview,
    UpdateReview,
    DeleteReview,
    ShowGameReviews,
    ShowUserReviews,
    ShowPlatformReviews,

    Statistics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Run(Action),
    Open(MenuState),
    Back,
}

#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub label: &'static str,
    pub entry: Entry,
}

const fn run(label: &'static str, action: Action) -> MenuItem {
    MenuItem { label, entry: Entry::Run(action) }
}

const fn open(label: &'static str, state: MenuState) -> MenuItem {
    MenuItem { label, entry: Entry::Open(state) }
}

const fn back(label: &'static str) -> MenuItem {
    MenuItem { label, entry: Entry::Back }
}

const MAIN: &[MenuItem] = &[
    open("User Management", MenuState::Users),
    open("Game Management", MenuState::Games),
    open("Platform Management", MenuState::Platforms),
    open("Review Management", MenuState::Reviews),
    run("Statistics", Action::Statistics),
    back("Exit"),
];

const USERS: &[MenuItem] = &[
    run("Show All Users", Action::ShowUsers),
    run("Add New User", Action::AddUser),
    run("Update User", Action::UpdateUser),
    run("Update User Privilege", Action::UpdateUserPrivilege),
    run("Delete User", Action::DeleteUser),
    back("Back to Main Menu"),
];

const GAMES: &[MenuItem] = &[
    run("Show All Games", Action::ShowGames),
    run("Add New Game", Action::AddGame),
    run("Update Game", Action::UpdateGame),
    run("Delete Game", Action::DeleteGame),
    open("Manage Categories", MenuState::Categories),
    back("Back to Main Menu"),
];

const CATEGORIES: &[MenuItem] = &[
    run("Show All Categories", Action::ShowCategories),
    run("Add New Category", Action::AddCategory),
    run("Update Category", Action::UpdateCategory),
    run("Delete Category", Action::DeleteCategory),
    back("Back to Game Menu"),
];

const PLATFORMS: &[MenuItem] = &[
    run("Show All Platforms", Action::ShowPlatforms),
    run("Add New Platform", Action::AddPlatform),
    run("Update Platform", Action::UpdatePlatform),
    run("Delete Platform", Action::DeletePlatform),
    run("Link Game to Platform", Action::LinkGame),
    run("Unlink Game from Platform", Action::UnlinkGame),
    run("Update Link Price", Action::UpdateLinkPrice),
    run("Show Game Platforms", Action::ShowGamePlatforms),
    run("Show Platform Games", Action::ShowPlatformGames),
    back("Back to Main Menu"),
];

const REVIEWS: &[MenuItem] = &[
    run("Show All Reviews", Action::ShowReviews),
    run("Add Review", Action::AddReview),
    run("Update Review", Action::UpdateReview),
    run("Delete Review", Action::DeleteReview),
    run("View Game Reviews", Action::ShowGameReviews),
    run("View User Reviews", Action::ShowUserReviews),
    run("View Platform Reviews", Action::ShowPlatformReviews),
    back("Back to Main Menu"),
];

impl MenuState {
    pub fn items(self) -> &'static [MenuItem] {
        match self {
            MenuState::Main => MAIN,
            MenuState::Users => USERS,
            MenuState::Games => GAMES,
            MenuState::Categories => CATEGORIES,
            MenuState::Platforms => PLATFORMS,
            MenuState::Reviews => REVIEWS,
            MenuState::Exit => &[],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MenuState::Main => "GAME RATING ADMIN PANEL",
            MenuState::Users => "User Management",
            MenuState::Games => "Game Management",
            MenuState::Categories => "Manage Categories",
            MenuState::Platforms => "Platform Management",
            MenuState::Reviews => "Review Management",
            MenuState::Exit => "",
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Run(Action),
    Opened(MenuState),
    Back,
    Exit,
}

/// One open menu and its own highlighted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub state: MenuState,
    pub selected: usize,
}

impl Activation {
    fn new(state: MenuState) -> Self {
        Self { state, selected: 0 }
    }
}

#[derive(Debug, Clone)]
pub struct MenuMachine {
    stack: Vec<Activation>,
}

impl Default for MenuMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuMachine {
    pub fn new() -> Self {
        Self {
            stack: vec![Activation::new(MenuState::Main)],
        }
    }

    pub fn state(&self) -> MenuState {
        self.stack
            .last()
            .map(|a| a.state)
            .unwrap_or(MenuState::Exit)
    }

    pub fn selected(&self) -> usize {
        self.stack.last().map(|a| a.selected).unwrap_or(0)
    }

    /// Open menus from the root down.
    pub fn path(&self) -> &[Activation] {
        &self.stack
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn step(&mut self, key: Key) -> Outcome {
        let Some(current) = self.stack.last_mut() else {
            return Outcome::Exit;
        };
        let items = current.state.items();
        let len = items.len();
        match key {
            Key::Up => {
                current.selected = (current.selected + len - 1) % len;
                Outcome::Moved
            }
            Key::Down => {
                current.selected = (current.selected + 1) % len;
                Outcome::Moved
            }
            Key::Confirm => match items[current.selected].entry {
                Entry::Run(action) => Outcome::Run(action),
                Entry::Open(state) => {
                    self.stack.push(Activation::new(state));
                    Outcome::Opened(state)
                }
                Entry::Back => self.pop(),
            },
            Key::Cancel => self.pop(),
        }
    }

    fn pop(&mut self) -> Outcome {
        self.stack.pop();
        if self.stack.is_empty() {
            Outcome::Exit
        } else {
            Outcome::Back
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [MenuState; 6] = [
        MenuState::Main,
        MenuState::Users,
        MenuState::Games,
        MenuState::Categories,
        MenuState::Platforms,
        MenuState::Reviews,
    ];

    #[test]
    fn starts_on_main_with_first_entry() {
        let machine = MenuMachine::new();
        assert_eq!(machine.state(), MenuState::Main);
        assert_eq!(machine.selected(), 0);
    }

    #[test]
    fn every_menu_ends_with_back() {
        for state in ALL_STATES {
            let last = state.items().last().unwrap();
            assert_eq!(last.entry, Entry::Back, "{:?}", state);
        }
    }

    #[test]
    fn up_from_first_wraps_to_last() {
        let mut machine = MenuMachine::new();
        assert_eq!(machine.step(Key::Up), Outcome::Moved);
        assert_eq!(machine.selected(), MAIN.len() - 1);
        assert_eq!(machine.step(Key::Down), Outcome::Moved);
        assert_eq!(machine.selected(), 0);
    }

    #[test]
    fn confirm_runs_highlighted_action_and_stays() {
        let mut machine = MenuMachine::new();
        machine.step(Key::Confirm);
        assert_eq!(machine.state(), MenuState::Users);
        machine.step(Key::Down);
        assert_eq!(machine.step(Key::Confirm), Outcome::Run(Action::AddUser));
        assert_eq!(machine.state(), MenuState::Users);
        assert_eq!(machine.selected(), 1);
    }

    #[test]
    fn category_submenu_nests_under_games() {
        let mut machine = MenuMachine::new();
        machine.step(Key::Down);
        assert_eq!(machine.step(Key::Confirm), Outcome::Opened(MenuState::Games));
        for _ in 0..4 {
            machine.step(Key::Down);
        }
        assert_eq!(machine.step(Key::Confirm), Outcome::Opened(MenuState::Categories));
        assert_eq!(machine.path().len(), 3);

        assert_eq!(machine.step(Key::Cancel), Outcome::Back);
        assert_eq!(machine.state(), MenuState::Games);
        // the parent keeps its own selection
        assert_eq!(machine.selected(), 4);
    }

    #[test]
    fn child_selection_is_not_shared_with_parent() {
        let mut machine = MenuMachine::new();
        machine.step(Key::Down);
        machine.step(Key::Down);
        machine.step(Key::Confirm);
        assert_eq!(machine.state(), MenuState::Platforms);
        assert_eq!(machine.selected(), 0);
    }

    #[test]
    fn back_entry_pops_to_parent() {
        let mut machine = MenuMachine::new();
        machine.step(Key::Confirm);
        machine.step(Key::Up);
        assert_eq!(machine.step(Key::Confirm), Outcome::Back);
        assert_eq!(machine.state(), MenuState::Main);
    }

    #[test]
    fn cancel_at_root_exits() {
        let mut machine = MenuMachine::new();
        assert_eq!(machine.step(Key::Cancel), Outcome::Exit);
        assert!(machine.is_done());
        assert_eq!(machine.state(), MenuState::Exit);
        assert_eq!(machine.step(Key::Confirm), Outcome::Exit);
    }

    #[test]
    fn exit_entry_on_main_exits() {
        let mut machine = MenuMachine::new();
        machine.step(Key::Up);
        assert_eq!(machine.step(Key::Confirm), Outcome::Exit);
    }

    #[test]
    fn statistics_runs_from_main() {
        let mut machine = MenuMachine::new();
        for _ in 0..4 {
            machine.step(Key::Down);
        }
        assert_eq!(machine.step(Key::Confirm), Outcome::Run(Action::Statistics));
        assert_eq!(machine.state(), MenuState::Main);
    }
}
