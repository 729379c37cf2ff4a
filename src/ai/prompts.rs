use crate::quiz::QuestionType;

/// A system/user prompt pair for one structured request.
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build_metadata_prompt(&self, passage: &str) -> PromptPair {
        let system = String::from(
            "You are an expert TOEFL reading-test writer. Derive a quiz title and a one-sentence \
summary introduction strictly from the passage you are given. Do not invent facts that are not \
in the passage. Respond ONLY with JSON conforming to the provided schema. Do not include any \
explanations, markdown formatting, or extra text.",
        );

        let mut user = String::from("Passage:\n");
        user.push_str(passage);
        user.push_str(
            "\n\nProduce the quiz title and the summary introductory sentence for this passage.",
        );

        PromptPair { system, user }
    }

    pub fn build_question_prompt(
        &self,
        passage: &str,
        number: u32,
        qtype: QuestionType,
    ) -> PromptPair {
        let mut system = String::from(
            "You are an expert TOEFL reading-test writer. Write exactly one question of the \
requested type, grounded only in the passage. Always include a verbatim quotation from the \
passage as relevantArticleSnippet. Respond ONLY with JSON conforming to the provided schema. \
Do not include any explanations, markdown formatting, or extra text.\n\n",
        );
        system.push_str(self.type_constraints(qtype));

        let mut user = String::from("Passage:\n");
        user.push_str(passage);
        user.push_str(&format!(
            "\n\nQuestion number: {}\nQuestion type: {}\nWrite this question now.",
            number,
            qtype.as_label()
        ));

        PromptPair { system, user }
    }

    fn type_constraints(&self, qtype: QuestionType) -> &'static str {
        match qtype {
            QuestionType::FactualInfo => {
                "Constraints: a Factual Information question asks what the passage explicitly \
states. Provide exactly 4 answer choices with exactly one marked correct."
            }
            QuestionType::Vocabulary => {
                "Constraints: a Vocabulary question asks for the closest meaning of a word or \
phrase as used in the passage. Put the tested word in highlightedText. Provide exactly 4 \
answer choices with exactly one marked correct."
            }
            QuestionType::Inference => {
                "Constraints: an Inference question asks what can be inferred but is not \
explicitly stated. Provide exactly 4 answer choices with exactly one marked correct."
            }
            QuestionType::SentenceSimplification => {
                "Constraints: a Sentence Simplification question asks which choice best \
expresses the essential information of a sentence from the passage. Put that sentence in \
highlightedText. Provide exactly 4 answer choices with exactly one marked correct."
            }
            QuestionType::NegativeFactualInfo => {
                "Constraints: a Negative Factual Information question asks which choice is NOT \
stated in (or is contradicted by) the passage. Provide exactly 4 answer choices with exactly \
one marked correct."
            }
            QuestionType::InsertText => {
                "Constraints: an Insert Text question asks where a new sentence best fits. Set \
paragraphForInsertion to a paragraph from the passage carrying the four insertion markers \
[A], [B], [C] and [D], each exactly once, in left-to-right order. Set sentenceToInsert to \
the sentence to be inserted. The choices must be exactly the four marker labels [A], [B], \
[C], [D] in that order, with exactly one marked correct."
            }
            QuestionType::ProseSummary => {
                "Constraints: a Prose Summary question asks for the three choices that express \
the most important ideas of the passage. Provide exactly 6 answer choices with exactly 3 \
marked correct; the other 3 must be minor points or not in the passage."
            }
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
