//! EC2 error document formatting.

use std::io;

use ruststack_ec2_model::error::ErrorEnvelope;

use crate::serialize::{RenderOptions, into_string, new_writer, write_text_element};

/// Format an EC2 error as XML.
///
/// EC2 wraps a single error in `<Response><Errors>` and places the request id
/// after the error list. No XML declaration is emitted.
///
/// # Example output
///
/// ```xml
/// <Response>
///     <Errors>
///         <Error>
///             <Code>InvalidSubnetID.NotFound</Code>
///             <Message>The subnet ID 'subnet-1' does not exist</Message>
///         </Error>
///     </Errors>
///     <RequestID>req-1</RequestID>
/// </Response>
/// ```
#[must_use]
pub fn error_to_xml(envelope: &ErrorEnvelope, request_id: &str, options: &RenderOptions) -> String {
    let mut buf = Vec::with_capacity(256);
    // Writing to Vec<u8> is infallible; if this fails it means a logic error.
    if let Err(e) = write_error_xml(&mut buf, envelope, request_id, options) {
        tracing::error!(error = %e, code = %envelope.code, "failed to serialize EC2 error XML");
        buf.clear();
    }
    into_string(buf)
}

fn write_error_xml(
    buf: &mut Vec<u8>,
    envelope: &ErrorEnvelope,
    request_id: &str,
    options: &RenderOptions,
) -> io::Result<()> {
    let mut writer = new_writer(buf, options.indent());

    writer.create_element("Response").write_inner_content(|w| {
        w.create_element("Errors").write_inner_content(|w| {
            w.create_element("Error").write_inner_content(|w| {
                write_text_element(w, "Code", &envelope.code)?;
                write_text_element(w, "Message", &envelope.message)
            })?;
            Ok(())
        })?;
        write_text_element(w, "RequestID", request_id)
    })?;

    Ok(())
}
