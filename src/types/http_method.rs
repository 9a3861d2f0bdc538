//! HTTP methods a webhook can be registered for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Method string that does not name a supported webhook method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownHttpMethod(pub String);

/// HTTP method of a webhook descriptor or an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  Delete,
  Get,
  Head,
  Options,
  Patch,
  Post,
  Put,
}

impl HttpMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      HttpMethod::Delete => "DELETE",
      HttpMethod::Get => "GET",
      HttpMethod::Head => "HEAD",
      HttpMethod::Options => "OPTIONS",
      HttpMethod::Patch => "PATCH",
      HttpMethod::Post => "POST",
      HttpMethod::Put => "PUT",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for HttpMethod {
  type Err = UnknownHttpMethod;

  /// Parses a method name, ignoring ASCII case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "DELETE" => Ok(HttpMethod::Delete),
      "GET" => Ok(HttpMethod::Get),
      "HEAD" => Ok(HttpMethod::Head),
      "OPTIONS" => Ok(HttpMethod::Options),
      "PATCH" => Ok(HttpMethod::Patch),
      "POST" => Ok(HttpMethod::Post),
      "PUT" => Ok(HttpMethod::Put),
      _ => Err(UnknownHttpMethod(s.to_string())),
    }
  }
}

impl TryFrom<&axum::http::Method> for HttpMethod {
  type Error = UnknownHttpMethod;

  fn try_from(method: &axum::http::Method) -> Result<Self, Self::Error> {
    method.as_str().parse()
  }
}
