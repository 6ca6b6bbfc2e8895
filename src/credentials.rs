//! API tokens from the Terraform CLI config file.
//!
//! Only `credentials` entries are read, either as `credentials "<hostname>" { ... }`
//! blocks or as a `credentials = { "<hostname>" = { ... } }` attribute; everything
//! else in the file is ignored.

use std::path::{Path, PathBuf};

use hcl::Body;
use hcl::expr::{Expression, Object, ObjectKey, TemplateExpr};
use hcl::template::{Element, Template};

use crate::error::{RemoteOpsError, Result};

pub const CREDENTIALS_FILE_NAME: &str = ".terraformrc";

const CREDENTIALS_BLOCK: &str = "credentials";
const TOKEN_KEY: &str = "token";

/// `~/.terraformrc`
pub fn default_credentials_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CREDENTIALS_FILE_NAME))
        .ok_or(RemoteOpsError::HomeDirUnavailable)
}

#[derive(Debug, Clone)]
pub struct CredentialsFile {
    path: PathBuf,
    body: Body,
}

impl CredentialsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let source =
            std::fs::read_to_string(path).map_err(|source| RemoteOpsError::CredentialsRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&source, path)
    }

    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        let body = hcl::parse(source).map_err(|source| RemoteOpsError::CredentialsParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            body,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Token for `hostname`, from either a `credentials "<hostname>" { ... }` block
    /// or a `credentials = { "<hostname>" = { ... } }` attribute.
    pub fn token_for(&self, hostname: &str) -> Result<String> {
        let token = match self.find_host(hostname) {
            Some(HostEntry::Block(body)) => body
                .attributes()
                .find(|attr| attr.key() == TOKEN_KEY)
                .map(|attr| attr.expr()),
            Some(HostEntry::Object(entries)) => entries
                .iter()
                .find(|(key, _)| object_key_str(key) == Some(TOKEN_KEY))
                .map(|(_, value)| value),
            Some(HostEntry::NotAnObject) => None,
            None => {
                return Err(RemoteOpsError::MissingCredentials {
                    hostname: hostname.to_string(),
                    path: self.path.clone(),
                });
            }
        };

        let token = token.ok_or_else(|| RemoteOpsError::MissingToken {
            hostname: hostname.to_string(),
            path: self.path.clone(),
        })?;

        text_value(token).ok_or_else(|| RemoteOpsError::TokenNotText {
            hostname: hostname.to_string(),
            path: self.path.clone(),
            found: expression_kind(token),
        })
    }

    fn find_host(&self, hostname: &str) -> Option<HostEntry<'_>> {
        let block = self
            .body
            .blocks()
            .filter(|block| block.identifier() == CREDENTIALS_BLOCK)
            .find(|block| {
                block
                    .labels()
                    .first()
                    .is_some_and(|label| label.as_str() == hostname)
            });
        if let Some(block) = block {
            return Some(HostEntry::Block(block.body()));
        }

        self.body
            .attributes()
            .filter(|attr| attr.key() == CREDENTIALS_BLOCK)
            .find_map(|attr| match attr.expr() {
                Expression::Object(hosts) => hosts
                    .iter()
                    .find(|(key, _)| object_key_str(key) == Some(hostname))
                    .map(|(_, value)| value),
                _ => None,
            })
            .map(|value| match value {
                Expression::Object(entries) => HostEntry::Object(entries),
                _ => HostEntry::NotAnObject,
            })
    }
}

enum HostEntry<'a> {
    Block(&'a Body),
    Object(&'a Object<ObjectKey, Expression>),
    NotAnObject,
}

fn object_key_str(key: &ObjectKey) -> Option<&str> {
    match key {
        ObjectKey::Identifier(ident) => Some(ident.as_str()),
        ObjectKey::Expression(Expression::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Plain strings and heredocs without interpolation or directives.
fn text_value(expr: &Expression) -> Option<String> {
    match expr {
        Expression::String(s) => Some(s.clone()),
        Expression::TemplateExpr(template_expr) => {
            let template = Template::from_expr(template_expr).ok()?;
            let mut text = String::new();
            for element in template.elements() {
                match element {
                    Element::Literal(literal) => text.push_str(literal),
                    _ => return None,
                }
            }
            if matches!(**template_expr, TemplateExpr::Heredoc(_)) {
                let trimmed = text.trim_end_matches(['\n', '\r']).len();
                text.truncate(trimmed);
            }
            Some(text)
        }
        _ => None,
    }
}

fn expression_kind(expr: &Expression) -> &'static str {
    match expr {
        Expression::Null => "null",
        Expression::Bool(_) => "bool",
        Expression::Number(_) => "number",
        Expression::Array(_) => "array",
        Expression::Object(_) => "object",
        Expression::TemplateExpr(_) => "template",
        _ => "expression",
    }
}
