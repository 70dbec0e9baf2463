//! Console flows against in-memory repositories and scripted input.

mod prompt_tests;
mod screen_tests;

use std::io::Cursor;

use crate::prompt::Console;

pub(crate) type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

pub(crate) fn console(input: &str) -> TestConsole {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub(crate) fn output(console: TestConsole) -> String {
    String::from_utf8(console.into_parts().1).unwrap()
}

/// Operator lines joined with newlines, with a trailing newline.
pub(crate) fn lines(input: &[&str]) -> String {
    let mut text = input.join("\n");
    text.push('\n');
    text
}
