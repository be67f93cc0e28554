mod answer;
mod sql;
mod template;

pub use answer::{answer_messages, render_rows};
pub use sql::sql_generation_messages;
pub use template::PromptTemplate;
