//! Newline-delimited JSON-RPC over a byte stream (stdin/stdout in production).

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::{
    mcp::{
        handler::handle_mcp_request,
        protocol::{error_codes, Request, Response},
    },
    AppState,
};

/// Serves requests from stdin until EOF, writing responses to stdout.
pub async fn run_stdio(state: AppState) -> io::Result<()> {
    info!("Solana MCP Server running on stdio");
    let stdin = io::BufReader::new(io::stdin());
    let stdout = io::stdout();
    serve(stdin, stdout, &state).await
}

/// Reads one request per line and writes one response line per request.
/// Returns when the reader hits EOF.
pub async fn serve<R, W>(mut reader: R, mut writer: W, state: &AppState) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            info!("EOF received, shutting down MCP server");
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!("Rejected request line that is not valid UTF-8: {}", e);
                let response = Response::error(
                    serde_json::Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: request is not valid UTF-8 ({})", e),
                );
                write_response(&mut writer, &response).await?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        // Raw lines may carry secret keys; only the size is logged.
        debug!("Received request line ({} bytes)", line.len());

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => handle_mcp_request(request, state).await,
            Err(parse_error) => {
                error!("JSON parse error: {}", parse_error);
                Some(Response::error(
                    serde_json::Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", parse_error),
                ))
            }
        };

        if let Some(response) = response {
            write_response(&mut writer, &response).await?;
        }
    }

    info!("MCP server shutting down");
    Ok(())
}

async fn write_response<W>(writer: &mut W, response: &Response) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut response_json = serde_json::to_string(response)?;
    debug!("Sending: {}", response_json);
    response_json.push('\n');
    writer.write_all(response_json.as_bytes()).await?;
    writer.flush().await
}
