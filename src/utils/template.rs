// file: src/utils/template.rs
// description: question-answering prompt template with placeholder substitution
// reference: https://docs.llamaindex.ai/en/stable/module_guides/models/prompts/

const DEFAULT_QA_TEMPLATE: &str = "Context information is below.\n\
---------------------\n\
{context_str}\n\
---------------------\n\
Given the context information and not prior knowledge, answer the query.\n\
Query: {query_str}\n\
Answer: ";

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new() -> Self {
        Self {
            template: DEFAULT_QA_TEMPLATE.to_string(),
        }
    }

    pub fn with_custom_template(template: String) -> Self {
        Self { template }
    }

    pub fn render(&self, context: &str, query: &str) -> String {
        self.template
            .replace("{context_str}", context)
            .replace("{query_str}", query)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new()
    }
}
