//! Resolution of the named arguments of a call into a [`RenderConfig`]

use arrow::datatypes::DataType;
use log::debug;

use crate::{
    config::types::RenderConfig,
    constants::arguments,
    engine::{BindArgument, Literal},
    error::BindError,
};

/// Position of the optional JSON context column.
const CONTEXT_ARGUMENT_INDEX: usize = 1;

/// Checks one folded argument and stores it into the configuration.
type Validator = fn(&DataType, Literal, &mut RenderConfig) -> Result<(), BindError>;

/// The named arguments the function understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigArgument {
    Autoescape,
    TemplatePath,
    AutoescapeExtensions,
    Unknown,
}

const CONFIG_ARGUMENTS: &[(&str, ConfigArgument, Validator)] = &[
    (arguments::AUTOESCAPE, ConfigArgument::Autoescape, bind_autoescape),
    (arguments::TEMPLATE_PATH, ConfigArgument::TemplatePath, bind_template_path),
    (
        arguments::AUTOESCAPE_EXTENSIONS,
        ConfigArgument::AutoescapeExtensions,
        bind_autoescape_extensions,
    ),
];

impl ConfigArgument {
    pub fn from_alias(alias: &str) -> Self {
        CONFIG_ARGUMENTS
            .iter()
            .find(|(name, _, _)| *name == alias)
            .map(|(_, argument, _)| *argument)
            .unwrap_or(ConfigArgument::Unknown)
    }

    pub fn name(&self) -> Option<&'static str> {
        self.entry().map(|(name, _, _)| *name)
    }

    fn validator(&self) -> Option<Validator> {
        self.entry().map(|(_, _, validator)| *validator)
    }

    fn entry(&self) -> Option<&'static (&'static str, ConfigArgument, Validator)> {
        CONFIG_ARGUMENTS.iter().find(|(_, argument, _)| argument == self)
    }
}

/// Binds a call, folding its named arguments into a [`RenderConfig`].
///
/// Argument 0 is always the template expression column and is not inspected.
/// An unnamed argument 1 is the JSON context column. Every other argument must be
/// a resolved constant: unnamed ones are skipped, named ones must name a
/// recognized option of the right type.
///
/// # Arguments
/// * `arguments` - The planner's argument expressions, in call order
///
/// # Returns
/// * `Result<RenderConfig, BindError>` - The configuration of the bound call
pub fn bind<A: BindArgument>(arguments: &[A]) -> Result<RenderConfig, BindError> {
    if arguments.is_empty() {
        return Err(BindError::EmptyArguments);
    }

    let mut config = RenderConfig::default();
    for (index, arg) in arguments.iter().enumerate().skip(1) {
        if arg.has_parameter() {
            return Err(BindError::UnresolvedParameter { index });
        }
        let alias = arg.alias().filter(|alias| !alias.is_empty());
        if alias.is_none() && index == CONTEXT_ARGUMENT_INDEX {
            // The JSON context is a data column and may vary per row.
            continue;
        }
        if !arg.is_foldable() {
            return Err(BindError::NonConstantArgument { index });
        }
        let Some(alias) = alias else {
            debug!("Skipping unnamed argument {index}");
            continue;
        };

        let validator = ConfigArgument::from_alias(alias)
            .validator()
            .ok_or_else(|| BindError::UnknownArgument { alias: alias.to_string() })?;
        // The slot is configuration even if its value turns out to be invalid.
        config.optional_arg_count += 1;

        let data_type = arg.data_type();
        let value = arg.evaluate().ok_or(BindError::NonConstantArgument { index })?;
        debug!("Binding argument '{alias}' of type {data_type} to {value}");
        validator(&data_type, value, &mut config)?;
    }

    debug!("Bound {}: {config:?}", crate::constants::FUNCTION_NAME);
    Ok(config)
}

fn wrong_type(name: &'static str, expected: &'static str, actual: &DataType) -> BindError {
    BindError::WrongArgumentType { name, expected, actual: actual.to_string() }
}

fn bind_autoescape(
    data_type: &DataType,
    value: Literal,
    config: &mut RenderConfig,
) -> Result<(), BindError> {
    if *data_type != DataType::Boolean {
        return Err(wrong_type(arguments::AUTOESCAPE, "a BOOLEAN", data_type));
    }
    match value {
        Literal::Boolean(autoescape) => config.autoescape = autoescape,
        Literal::Null => {}
        other => return Err(wrong_type(arguments::AUTOESCAPE, "a BOOLEAN", &other.data_type())),
    }
    Ok(())
}

fn bind_template_path(
    data_type: &DataType,
    value: Literal,
    config: &mut RenderConfig,
) -> Result<(), BindError> {
    if !is_string_type(data_type) {
        return Err(wrong_type(arguments::TEMPLATE_PATH, "a VARCHAR", data_type));
    }
    match value {
        Literal::String(path) => {
            config.template_path = without_nul(arguments::TEMPLATE_PATH, path)?;
        }
        Literal::Null => {}
        other => {
            return Err(wrong_type(arguments::TEMPLATE_PATH, "a VARCHAR", &other.data_type()))
        }
    }
    Ok(())
}

fn bind_autoescape_extensions(
    data_type: &DataType,
    value: Literal,
    config: &mut RenderConfig,
) -> Result<(), BindError> {
    const EXPECTED: &str = "a list of strings";
    if !matches!(
        data_type,
        DataType::List(_) | DataType::LargeList(_) | DataType::FixedSizeList(_, _)
    ) {
        return Err(wrong_type(arguments::AUTOESCAPE_EXTENSIONS, EXPECTED, data_type));
    }
    let elements = match value {
        Literal::Array { elements, .. } => elements,
        Literal::Null => return Ok(()),
        other => {
            return Err(wrong_type(arguments::AUTOESCAPE_EXTENSIONS, EXPECTED, &other.data_type()))
        }
    };
    for element in elements {
        match element {
            Literal::String(extension) => config
                .autoescape_extensions
                .push(without_nul(arguments::AUTOESCAPE_EXTENSIONS, extension)?),
            other => {
                return Err(BindError::InvalidListElement {
                    value: other.to_string(),
                    data_type: other.data_type().to_string(),
                })
            }
        }
    }
    Ok(())
}

fn without_nul(name: &'static str, value: String) -> Result<String, BindError> {
    if value.contains('\0') {
        return Err(BindError::NulByte { name });
    }
    Ok(value)
}

fn is_string_type(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View)
}
