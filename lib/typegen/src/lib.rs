pub mod ast;
pub mod composer;
pub mod error;
pub mod federation_spec;
pub mod processor;
pub mod state;
pub mod transform;
pub mod utils;

#[cfg(test)]
mod tests;

pub use composer::DeclarationUnit;
pub use error::TypegenError;
pub use processor::{
    LiteralTypeProcessor, PickedTypeProcessor, ProcessorConfig, TypeExpressionProcessor,
};
pub use state::schema_state::SchemaState;
pub use transform::{TypegenContext, TypegenOptions};
