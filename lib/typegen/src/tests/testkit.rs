use std::sync::Once;

use lazy_static::lazy_static;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use graphql_parser::query::{Definition, Document, OperationDefinition};

use crate::ast::fragments::FragmentLibrary;
use crate::composer::DeclarationUnit;
use crate::federation_spec::FederationMetadata;
use crate::processor::{
    LiteralTypeProcessor, PickedTypeProcessor, ProcessorConfig, TypeExpressionProcessor,
};
use crate::state::schema_state::SchemaState;
use crate::transform::{TypegenContext, TypegenOptions};
use crate::utils::parsing::{parse_operation, parse_schema};

fn init_test_logger_internal() {
    let tree_layer = tracing_tree::HierarchicalLayer::new(2)
        .with_bracketed_fields(true)
        .with_deferred_spans(false)
        .with_wraparound(25)
        .with_indent_lines(true)
        .with_timer(tracing_tree::time::Uptime::default())
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_targets(false);

    tracing_subscriber::registry()
        .with(tree_layer)
        .with(EnvFilter::from_default_env())
        .init();
}

lazy_static! {
    static ref TRACING_INIT: Once = Once::new();
}

pub fn init_logger() {
    TRACING_INIT.call_once(init_test_logger_internal);
}

pub fn schema_state(sdl: &str) -> SchemaState {
    SchemaState::new(&parse_schema(sdl))
}

pub fn first_operation<'d>(
    document: &'d Document<'static, String>,
) -> &'d OperationDefinition<'static, String> {
    document
        .definitions
        .iter()
        .find_map(|def| match def {
            Definition::Operation(operation) => Some(operation),
            _ => None,
        })
        .expect("expected an operation")
}

/// Transforms the first operation of `query` and returns its single
/// declaration's expression.
pub fn literal_expr(sdl: &str, query: &str, options: TypegenOptions) -> String {
    literal_expr_with_config(sdl, query, options, ProcessorConfig::default())
}

pub fn literal_expr_with_config(
    sdl: &str,
    query: &str,
    options: TypegenOptions,
    config: ProcessorConfig,
) -> String {
    let processor = LiteralTypeProcessor::new(config);
    operation_expr(sdl, query, options, &processor)
}

pub fn picked_expr(sdl: &str, query: &str, options: TypegenOptions) -> String {
    picked_expr_with_config(sdl, query, options, ProcessorConfig::default())
}

pub fn picked_expr_with_config(
    sdl: &str,
    query: &str,
    options: TypegenOptions,
    config: ProcessorConfig,
) -> String {
    let processor = PickedTypeProcessor::new(config);
    operation_expr(sdl, query, options, &processor)
}

fn operation_expr(
    sdl: &str,
    query: &str,
    options: TypegenOptions,
    processor: &dyn TypeExpressionProcessor,
) -> String {
    let state = schema_state(sdl);
    let document = parse_operation(query);
    let fragments = FragmentLibrary::new(&document);
    let ctx = TypegenContext::new(&state, &fragments, processor, options);

    let units = ctx
        .transform_operation("Test", first_operation(&document))
        .expect("transformation failed");
    assert_eq!(units.len(), 1, "expected a single declaration unit");
    units.into_iter().next().unwrap().expression
}

/// Transforms every operation and fragment of `query` with the literal
/// processor.
pub fn literal_units(sdl: &str, query: &str, options: TypegenOptions) -> Vec<DeclarationUnit> {
    let state = schema_state(sdl);
    let document = parse_operation(query);
    let fragments = FragmentLibrary::new(&document);
    let processor = LiteralTypeProcessor::new(ProcessorConfig::default());
    let ctx = TypegenContext::new(&state, &fragments, &processor, options);

    ctx.transform_document(&document).expect("transformation failed")
}

/// Same as [`literal_expr`], with federation metadata resolved from the
/// schema.
pub fn federation_literal_expr(sdl: &str, query: &str, options: TypegenOptions) -> String {
    let schema = parse_schema(sdl);
    let state = SchemaState::new(&schema);
    let metadata = FederationMetadata::new(&schema).expect("invalid federation metadata");
    let document = parse_operation(query);
    let fragments = FragmentLibrary::new(&document);
    let processor = LiteralTypeProcessor::new(ProcessorConfig::default());
    let ctx =
        TypegenContext::new(&state, &fragments, &processor, options).with_federation(&metadata);

    let units = ctx
        .transform_operation("Test", first_operation(&document))
        .expect("transformation failed");
    assert_eq!(units.len(), 1, "expected a single declaration unit");
    units.into_iter().next().unwrap().expression
}

pub fn render_units(units: &[DeclarationUnit]) -> String {
    units
        .iter()
        .map(|unit| format!("{} = {}", unit.name, unit.expression))
        .collect::<Vec<_>>()
        .join("\n")
}
