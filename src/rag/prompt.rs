//! Fixed prompt framing

pub fn answer_prompt(question: &str, context: &str) -> String {
    format!(
        "Answer the question using only the context below. Each context item is a \
         graph entity with an id, kind, title and optional timestamp, region and \
         summary. Cite the ids you rely on. If the context is insufficient, say so.\n\n\
         Context:\n{}\n\nQuestion: {}\n\nAnswer:",
        context,
        question.trim()
    )
}

pub fn summary_prompt(title: &str, context: &str) -> String {
    format!(
        "Summarize the entity \"{}\" and how it relates to its neighbors in the \
         knowledge graph. Use only the context below, which lists the entity first \
         followed by its direct neighbors. Highlight risks where relevant.\n\n\
         Context:\n{}\n\nSummary:",
        title, context
    )
}
