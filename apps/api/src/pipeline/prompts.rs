//! The QA prompt template. Retrieved chunks are joined with newlines and
//! substituted for {context}; the user's question for {question}.

pub const QA_PROMPT_TEMPLATE: &str =
    "Answer the question based only on the following context:\n{context}\n\nQuestion: {question}";

pub fn render_qa_prompt(context: &str, question: &str) -> String {
    QA_PROMPT_TEMPLATE
        .replace("{context}", context)
        .replace("{question}", question)
}
