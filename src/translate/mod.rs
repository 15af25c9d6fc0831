pub mod factory;
pub mod huggingface;
pub mod interface;
pub mod invoker;
pub mod model_service;

pub use factory::ProviderFactory;
pub use interface::{ModelProvider, TranslateRequest, TranslateResponse};
pub use invoker::TranslationInvoker;
