mod expense;
mod settings;

pub use expense::{Category, Expense};
pub use settings::{format_keyword_pairs, parse_keyword_pairs, Settings, BUILTIN_KEYWORDS};

#[cfg(test)]
mod tests;
