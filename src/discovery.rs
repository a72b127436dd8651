use aws_sdk_cloudformation::Client as CloudFormationClient;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Aws(#[from] aws_sdk_cloudformation::Error),
}

/// Resolves a named output of a deployed stack. Returns `None` when the
/// stack exists but exports no output under that key.
pub async fn get_stack_output(
    client: &CloudFormationClient,
    stack_name: &str,
    output_key: &str,
) -> Result<Option<String>, DiscoveryError> {
    let resp = client
        .describe_stacks()
        .stack_name(stack_name)
        .send()
        .await
        .map_err(aws_sdk_cloudformation::Error::from)?;

    Ok(resp
        .stacks()
        .first()
        .map(|stack| stack.outputs())
        .unwrap_or_default()
        .iter()
        .find(|output| output.output_key() == Some(output_key))
        .and_then(|output| output.output_value())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_cloudformation::operation::describe_stacks::DescribeStacksOutput;
    use aws_sdk_cloudformation::primitives::DateTime;
    use aws_sdk_cloudformation::types::{Output, Stack, StackStatus};
    use aws_smithy_mocks::{mock, mock_client};

    fn aurora_stack() -> Stack {
        Stack::builder()
            .stack_name("aurora-stack")
            .creation_time(DateTime::from_secs(0))
            .stack_status(StackStatus::CreateComplete)
            .outputs(
                Output::builder()
                    .output_key("JDBCAuroraConnectionString")
                    .output_value("jdbc:mysql://aurora.cluster:3306/homes")
                    .build(),
            )
            .outputs(
                Output::builder()
                    .output_key("VpcId")
                    .output_value("vpc-0a1b2c")
                    .build(),
            )
            .build()
    }

    #[tokio::test]
    async fn present_output_key_returns_its_value() {
        let rule = mock!(aws_sdk_cloudformation::Client::describe_stacks).then_output(|| {
            DescribeStacksOutput::builder()
                .stacks(aurora_stack())
                .build()
        });
        let client = mock_client!(aws_sdk_cloudformation, [&rule]);

        let value = get_stack_output(&client, "aurora-stack", "JDBCAuroraConnectionString")
            .await
            .unwrap();
        assert_eq!(
            value.as_deref(),
            Some("jdbc:mysql://aurora.cluster:3306/homes")
        );
    }

    #[tokio::test]
    async fn absent_output_key_returns_none() {
        let rule = mock!(aws_sdk_cloudformation::Client::describe_stacks).then_output(|| {
            DescribeStacksOutput::builder()
                .stacks(aurora_stack())
                .build()
        });
        let client = mock_client!(aws_sdk_cloudformation, [&rule]);

        let value = get_stack_output(&client, "aurora-stack", "NoSuchOutput")
            .await
            .unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn stackless_response_returns_none() {
        let rule = mock!(aws_sdk_cloudformation::Client::describe_stacks)
            .then_output(|| DescribeStacksOutput::builder().build());
        let client = mock_client!(aws_sdk_cloudformation, [&rule]);

        let value = get_stack_output(&client, "aurora-stack", "JDBCAuroraConnectionString")
            .await
            .unwrap();
        assert_eq!(value, None);
    }
}
