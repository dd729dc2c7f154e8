use serde::{Deserialize, Serialize};

use crate::processor::{FieldPair, ProcessorToken};

/// One emittable named type declaration, handed to the surrounding
/// declaration emitter which applies naming and export syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationUnit {
    pub name: String,
    pub expression: String,
}

/// Joins one concrete type's rendered tokens and fragment usages into a
/// single intersection expression: named-field pairs merge into one record
/// fragment, bare text and usage tokens follow as additional operands.
/// Returns `None` when the type contributes nothing observable.
pub(crate) fn compose_operands(
    tokens: Vec<ProcessorToken>,
    fragment_usages: &[String],
) -> Option<String> {
    let mut pairs: Vec<FieldPair> = Vec::new();
    let mut texts: Vec<String> = Vec::new();

    for token in tokens {
        match token {
            ProcessorToken::Field(pair) => pairs.push(pair),
            ProcessorToken::Text(text) => texts.push(text),
        }
    }

    let mut operands: Vec<String> = Vec::new();
    if !pairs.is_empty() {
        operands.push(render_record(&pairs));
    }
    operands.extend(texts);
    operands.extend(fragment_usages.iter().cloned());

    match operands.len() {
        0 => None,
        1 => Some(operands.remove(0)),
        _ => Some(operands.join(" & ")),
    }
}

fn render_record(pairs: &[FieldPair]) -> String {
    let body = pairs
        .iter()
        .map(|pair| {
            format!(
                "{}{}: {}",
                pair.name,
                if pair.optional { "?" } else { "" },
                pair.type_text
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("{{ {} }}", body)
}

/// Joins the contributing concrete types' expressions into the top-level
/// union, in possible-types order. A single contributor is returned bare,
/// never wrapped in a one-branch union.
pub(crate) fn compose_union(branches: &[String]) -> Option<String> {
    match branches.len() {
        0 => None,
        1 => Some(branches[0].clone()),
        _ => Some(branches.join(" | ")),
    }
}

/// Builds the declarations for one named selection root: a single unit when
/// exactly one concrete type contributes, otherwise one name-suffixed unit
/// per contributing type plus a top-level unit unioning their names.
pub(crate) fn build_declarations(
    base_name: &str,
    branches: Vec<(String, String)>,
) -> Vec<DeclarationUnit> {
    match branches.len() {
        0 => vec![DeclarationUnit {
            name: base_name.to_string(),
            expression: "{}".to_string(),
        }],
        1 => vec![DeclarationUnit {
            name: base_name.to_string(),
            expression: branches.into_iter().next().map(|(_, expr)| expr).unwrap_or_default(),
        }],
        _ => {
            let mut units = Vec::new();
            let mut names = Vec::new();
            for (concrete_type, expression) in branches {
                let name = format!("{}_{}", base_name, concrete_type);
                names.push(name.clone());
                units.push(DeclarationUnit { name, expression });
            }
            units.push(DeclarationUnit {
                name: base_name.to_string(),
                expression: names.join(" | "),
            });
            units
        }
    }
}
