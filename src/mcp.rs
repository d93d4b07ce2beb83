//! Purpose: Provide the MCP JSON-RPC core and the documentation handler.
//! Key exports: `Dispatcher`, `McpHandler`, `DocsHandler`, envelope types.
//! Role: Transport-agnostic protocol adapter driven by the stdio loop.
//! Invariants: JSON-RPC envelopes stay stable and method routing is deterministic.
//! Invariants: Unknown methods and malformed request shapes map to protocol errors.
//! Invariants: Unknown component names are successful text responses, never errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::docs::{catalog_markdown, component_markdown};
use crate::registry::Registry;

const JSON_RPC_VERSION: &str = "2.0";
const MCP_PROTOCOL_VERSION: &str = "2025-06-18";
const PARSE_ERROR_CODE: i32 = -32700;
const INVALID_REQUEST_CODE: i32 = -32600;
const METHOD_NOT_FOUND_CODE: i32 = -32601;
const INVALID_PARAMS_CODE: i32 = -32602;
const INTERNAL_ERROR_CODE: i32 = -32603;

const RESOURCE_URI_PREFIX: &str = "uidocs:///components/";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
    Null,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: RequestId, error: RpcError) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR_CODE, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST_CODE, message)
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(METHOD_NOT_FOUND_CODE, message)
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS_CODE, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR_CODE, message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DispatchOutcome {
    Reply(Response),
    Silent,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerMetadata {
    pub name: String,
    pub version: String,
    pub protocol_version: String,
}

impl Default for ServerMetadata {
    fn default() -> Self {
        Self {
            name: "uidocs".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolOutput {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resource {
    pub uri: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceText {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

/// Behavior behind the protocol: what tools and resources exist and how
/// calls against them are answered.
pub trait McpHandler {
    fn list_tools(&self) -> Vec<Tool>;
    fn call_tool(&self, call: ToolCall) -> Result<ToolOutput, RpcError>;
    fn list_resources(&self) -> Vec<Resource>;
    fn read_resource(&self, uri: &str) -> Result<ResourceText, RpcError>;
}

pub struct Dispatcher<H> {
    metadata: ServerMetadata,
    handler: H,
}

impl<H: McpHandler> Dispatcher<H> {
    pub fn new(handler: H) -> Self {
        Self {
            metadata: ServerMetadata::default(),
            handler,
        }
    }

    pub fn metadata(&self) -> &ServerMetadata {
        &self.metadata
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Dispatch one decoded JSON value. Requests carrying an id always
    /// produce a reply; notifications never do, even on routing errors.
    pub fn dispatch_value(&self, value: Value) -> DispatchOutcome {
        match parse_request(value) {
            Ok(request) => self.dispatch_request(request),
            Err(response) => DispatchOutcome::Reply(response),
        }
    }

    pub fn dispatch_request(&self, request: Request) -> DispatchOutcome {
        let id = request.id.clone();
        let routed = self.route(request);
        match id {
            Some(id) => DispatchOutcome::Reply(match routed {
                Ok(result) => Response::success(id, result),
                Err(error) => Response::failure(id, error),
            }),
            None => DispatchOutcome::Silent,
        }
    }

    fn route(&self, request: Request) -> Result<Value, RpcError> {
        match request.method.as_str() {
            "initialize" => {
                expect_object_or_absent(request.params.as_ref())?;
                Ok(self.initialize_result())
            }
            "notifications/initialized" => {
                expect_object_or_absent(request.params.as_ref())?;
                Ok(json!({}))
            }
            "ping" => {
                expect_object_or_absent(request.params.as_ref())?;
                Ok(json!({}))
            }
            "tools/list" => {
                expect_object_or_absent(request.params.as_ref())?;
                Ok(json!({ "tools": self.handler.list_tools() }))
            }
            "tools/call" => {
                let params = expect_object(request.params.as_ref(), "tools/call")?;
                let call = tool_call_from_params(params)?;
                let output = self.handler.call_tool(call)?;
                encode(output)
            }
            "resources/list" => {
                expect_object_or_absent(request.params.as_ref())?;
                Ok(json!({ "resources": self.handler.list_resources() }))
            }
            "resources/read" => {
                let params = expect_object(request.params.as_ref(), "resources/read")?;
                let uri = params.get("uri").and_then(Value::as_str).ok_or_else(|| {
                    RpcError::invalid_params("resources/read requires string param `uri`")
                })?;
                let contents = self.handler.read_resource(uri)?;
                Ok(json!({ "contents": [contents] }))
            }
            other => Err(RpcError::method_not_found(format!(
                "method not found: {other}"
            ))),
        }
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": self.metadata.protocol_version,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "subscribe": false, "listChanged": false },
            },
            "serverInfo": {
                "name": self.metadata.name,
                "version": self.metadata.version,
            },
        })
    }
}

pub fn parse_jsonrpc_line(line: &str) -> Result<Value, RpcError> {
    serde_json::from_str::<Value>(line).map_err(|_| RpcError::parse_error("invalid JSON"))
}

fn parse_request(value: Value) -> Result<Request, Response> {
    let Value::Object(object) = value else {
        return Err(Response::failure(
            RequestId::Null,
            RpcError::invalid_request("request must be a JSON object"),
        ));
    };

    let id = match object.get("id") {
        None => None,
        Some(raw) => {
            Some(request_id(raw).map_err(|error| Response::failure(RequestId::Null, error))?)
        }
    };
    let error_id = || id.clone().unwrap_or(RequestId::Null);

    match object.get("jsonrpc").and_then(Value::as_str) {
        Some(JSON_RPC_VERSION) => {}
        Some(_) => {
            return Err(Response::failure(
                error_id(),
                RpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }
        None => {
            return Err(Response::failure(
                error_id(),
                RpcError::invalid_request("missing jsonrpc field"),
            ));
        }
    }

    let Some(method) = object.get("method").and_then(Value::as_str) else {
        return Err(Response::failure(
            error_id(),
            RpcError::invalid_request("missing method field"),
        ));
    };

    Ok(Request {
        jsonrpc: JSON_RPC_VERSION.to_string(),
        id,
        method: method.to_string(),
        params: object.get("params").cloned(),
    })
}

fn request_id(value: &Value) -> Result<RequestId, RpcError> {
    match value {
        Value::String(value) => Ok(RequestId::String(value.clone())),
        Value::Number(value) => value
            .as_i64()
            .map(RequestId::Number)
            .ok_or_else(|| RpcError::invalid_request("id must be an integer number")),
        Value::Null => Ok(RequestId::Null),
        _ => Err(RpcError::invalid_request(
            "id must be a string, integer number, or null",
        )),
    }
}

fn expect_object<'a>(
    params: Option<&'a Value>,
    method: &str,
) -> Result<&'a Map<String, Value>, RpcError> {
    match params {
        Some(Value::Object(map)) => Ok(map),
        _ => Err(RpcError::invalid_params(format!(
            "{method} requires object params"
        ))),
    }
}

fn expect_object_or_absent(params: Option<&Value>) -> Result<(), RpcError> {
    match params {
        None | Some(Value::Null) | Some(Value::Object(_)) => Ok(()),
        _ => Err(RpcError::invalid_params(
            "params must be an object when provided",
        )),
    }
}

fn tool_call_from_params(params: &Map<String, Value>) -> Result<ToolCall, RpcError> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::invalid_params("tools/call requires string param `name`"))?
        .to_string();

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(arguments)) => arguments.clone(),
        Some(_) => {
            return Err(RpcError::invalid_params(
                "tools/call `arguments` must be an object",
            ));
        }
    };

    Ok(ToolCall { name, arguments })
}

fn encode<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|_| RpcError::internal_error("failed to encode result"))
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// MCP handler exposing the component registry: two tools plus one
/// markdown resource per component.
pub struct DocsHandler {
    registry: Registry,
}

impl DocsHandler {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn not_found_text(&self, requested: &str) -> String {
        format!(
            "Component \"{requested}\" not found. Available components: {}",
            self.registry.component_names().join(", ")
        )
    }
}

impl McpHandler for DocsHandler {
    fn list_tools(&self) -> Vec<Tool> {
        let library = self.registry.library();
        vec![
            Tool {
                name: "get_component_info".to_string(),
                description: format!(
                    "Get information about {library} components including props, \
                     usage examples, and best practices"
                ),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "component": {
                            "type": "string",
                            "description": "Component name (e.g., \"button\", \"input\")",
                            "enum": self.registry.component_names(),
                        },
                    },
                    "required": ["component"],
                }),
            },
            Tool {
                name: "list_components".to_string(),
                description: format!("List all available components in {library}"),
                input_schema: json!({
                    "type": "object",
                    "properties": {},
                }),
            },
        ]
    }

    fn call_tool(&self, call: ToolCall) -> Result<ToolOutput, RpcError> {
        match call.name.as_str() {
            "get_component_info" => {
                // A missing argument reads as an unknown component; both get
                // the not-found text, not a protocol error.
                let requested = call
                    .arguments
                    .get("component")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                Ok(match self.registry.get(requested) {
                    Some(info) => ToolOutput::text(component_markdown(info)),
                    None => ToolOutput::text(self.not_found_text(requested)),
                })
            }
            "list_components" => Ok(ToolOutput::text(catalog_markdown(&self.registry))),
            other => Err(RpcError::invalid_params(format!(
                "unrecognized tool: {other}"
            ))),
        }
    }

    fn list_resources(&self) -> Vec<Resource> {
        self.registry
            .components()
            .iter()
            .map(|info| Resource {
                uri: format!("{RESOURCE_URI_PREFIX}{}", info.key()),
                name: info.key(),
                description: Some(format!("{} component documentation", info.name)),
                mime_type: Some("text/markdown".to_string()),
            })
            .collect()
    }

    fn read_resource(&self, uri: &str) -> Result<ResourceText, RpcError> {
        let info = uri
            .strip_prefix(RESOURCE_URI_PREFIX)
            .and_then(|key| self.registry.get(key))
            .ok_or_else(|| RpcError::invalid_params(format!("unknown resource uri: {uri}")))?;
        Ok(ResourceText {
            uri: uri.to_string(),
            mime_type: "text/markdown".to_string(),
            text: component_markdown(info),
        })
    }
}
