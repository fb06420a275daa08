//! Guard planning from tool argument shapes
//!
//! Tools are not registered anywhere. Which guardrails apply is decided from
//! the names of the arguments a call carries, the same names the site and
//! hosting tools use.

use serde_json::{Map, Value};

use crate::error::InputError;
use crate::input::{CredentialConfig, GuardInput, UploadDescriptor};

/// Arguments holding a single relative path
pub const PATH_ARGUMENTS: &[&str] = &["filePath", "path", "sitePath", "shopPath", "localPath"];

/// Arguments holding a list of relative paths
pub const PATH_LIST_ARGUMENTS: &[&str] = &["productImages"];

/// Arguments holding a SQL statement
pub const SQL_ARGUMENTS: &[&str] = &["sql", "query", "statement"];

/// Arguments holding a PHP snippet
pub const CODE_ARGUMENTS: &[&str] = &["code", "phpCode", "source"];

/// Alternative names for the two halves of an upload descriptor
const UPLOAD_SIZE: &[&str] = &["size", "sizeBytes"];
const UPLOAD_MIME: &[&str] = &["mimetype", "mimeType"];

/// Username/password argument pairs
const CREDENTIALS: &[(&[&str], &str)] = &[
    (&["user", "username"], "password"),
    (&["dbUser"], "dbPassword"),
];

/// Derive the guard inputs for a call, in evaluation order: paths, upload,
/// SQL, code, credentials.
///
/// Missing arguments add no guard. A recognised argument of the wrong type,
/// or half of a pair, is an input error.
pub fn plan_guards(arguments: &Value) -> Result<Vec<GuardInput>, InputError> {
    let args = arguments.as_object().ok_or(InputError::ArgumentsNotObject)?;
    let mut guards = Vec::new();

    for &name in PATH_ARGUMENTS {
        if let Some(path) = string_arg(args, name)? {
            guards.push(GuardInput::Path { path });
        }
    }

    for &name in PATH_LIST_ARGUMENTS {
        for path in string_list_arg(args, name)? {
            guards.push(GuardInput::Path { path });
        }
    }

    if let Some(upload) = upload_arg(args)? {
        guards.push(GuardInput::Upload(upload));
    }

    for &name in SQL_ARGUMENTS {
        if let Some(statement) = string_arg(args, name)? {
            guards.push(GuardInput::Sql { statement });
        }
    }

    for &name in CODE_ARGUMENTS {
        if let Some(source) = string_arg(args, name)? {
            guards.push(GuardInput::Code { source });
        }
    }

    for &(user_names, password_name) in CREDENTIALS {
        if let Some(config) = credential_arg(args, user_names, password_name)? {
            guards.push(GuardInput::Credential(config));
        }
    }

    Ok(guards)
}

fn string_arg(args: &Map<String, Value>, name: &str) -> Result<Option<String>, InputError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(wrong_type(name, "a string")),
    }
}

fn string_list_arg(args: &Map<String, Value>, name: &str) -> Result<Vec<String>, InputError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(String::from)
                    .ok_or_else(|| wrong_type(name, "an array of strings"))
            })
            .collect(),
        Some(_) => Err(wrong_type(name, "an array of strings")),
    }
}

/// First of `names` present in `args`
fn first_present(args: &Map<String, Value>, names: &[&'static str]) -> Option<&'static str> {
    names
        .iter()
        .copied()
        .find(|name| !matches!(args.get(*name), None | Some(Value::Null)))
}

fn upload_arg(args: &Map<String, Value>) -> Result<Option<UploadDescriptor>, InputError> {
    let size_name = first_present(args, UPLOAD_SIZE);
    let mime_name = first_present(args, UPLOAD_MIME);

    match (size_name, mime_name) {
        (None, None) => Ok(None),
        (Some(present), None) => Err(InputError::IncompletePair {
            present,
            missing: UPLOAD_MIME[0],
        }),
        (None, Some(present)) => Err(InputError::IncompletePair {
            present,
            missing: UPLOAD_SIZE[0],
        }),
        (Some(size_name), Some(mime_name)) => {
            let size_bytes = args
                .get(size_name)
                .and_then(Value::as_u64)
                .ok_or_else(|| wrong_type(size_name, "a non-negative integer"))?;
            let mime_type = string_arg(args, mime_name)?.unwrap_or_default();
            Ok(Some(UploadDescriptor {
                size_bytes,
                mime_type,
            }))
        }
    }
}

fn credential_arg(
    args: &Map<String, Value>,
    user_names: &[&'static str],
    password_name: &'static str,
) -> Result<Option<CredentialConfig>, InputError> {
    let user_name = first_present(args, user_names);
    let password = string_arg(args, password_name)?;

    match (user_name, password) {
        (None, None) => Ok(None),
        (Some(present), None) => Err(InputError::IncompletePair {
            present,
            missing: password_name,
        }),
        (None, Some(_)) => Err(InputError::IncompletePair {
            present: password_name,
            missing: user_names[0],
        }),
        (Some(user_name), Some(password)) => {
            let username = string_arg(args, user_name)?.unwrap_or_default();
            Ok(Some(CredentialConfig { username, password }))
        }
    }
}

fn wrong_type(field: &str, expected: &'static str) -> InputError {
    InputError::WrongType {
        field: field.to_string(),
        expected,
    }
}
