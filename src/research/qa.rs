use crate::llm::{CompletionClient, LlmError};
use crate::paper::SummarizedPaper;

/// Join every summary with a single space, in session order.
pub fn build_context(papers: &[SummarizedPaper]) -> String {
    papers
        .iter()
        .map(|p| p.summary.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-shot question over the given context; the answer is returned verbatim.
pub async fn ask(
    llm: &impl CompletionClient,
    context: &str,
    question: &str,
) -> Result<String, LlmError> {
    llm.complete(&format!("{context}\n\nQuestion: {question}"))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::testing::{MockLlm, summarized};

    #[test]
    fn context_joins_summaries_in_order() {
        let papers = vec![
            summarized("A", "First."),
            summarized("B", "Second."),
            summarized("C", "Third."),
        ];
        assert_eq!(build_context(&papers), "First. Second. Third.");
        assert_eq!(build_context(&[]), "");
    }

    #[tokio::test]
    async fn question_is_appended_to_context() {
        let llm = MockLlm::replying("  Answer with spacing.\n");
        let answer = ask(&llm, "First. Second.", "What is compared?")
            .await
            .unwrap();

        assert_eq!(answer, "  Answer with spacing.\n");
        assert_eq!(
            llm.prompts(),
            vec!["First. Second.\n\nQuestion: What is compared?".to_string()]
        );
    }

    #[tokio::test]
    async fn empty_answer_is_returned_as_is() {
        let llm = MockLlm::replying("");
        assert_eq!(ask(&llm, "ctx", "Anything?").await.unwrap(), "");
    }
}
