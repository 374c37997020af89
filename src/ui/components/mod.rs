mod command_input;
mod input;
mod key_result;
mod pager;
mod search_input;

pub use command_input::{CommandEvent, CommandInput};
pub use input::{InputResult, TextInput};
pub use key_result::KeyResult;
pub use pager::FilterPager;
pub use search_input::{SearchEvent, SearchInput};
