pub mod ebook;
pub mod extract;
pub mod llm;
pub mod prompts;
pub mod validator;
