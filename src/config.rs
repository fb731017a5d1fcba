// ABOUTME: Version, banner, and diagnostic-text constants for the driver

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "Monkey programming language";
pub const WELCOME_SUBTITLE: &str = "Type in expressions to have them evaluated.";

pub const PROMPT: &str = ">>";

/// The ASCII-art marker printed above parser diagnostics, mandated verbatim
/// by spec.md §6.
pub const ERROR_BANNER: &str = r#"            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

pub const PARSER_ERROR_HEADER: &str = "Woops! We ran into some monkey business here!";
