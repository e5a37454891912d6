//! Marketing description prompt
//!
//! Builds the Brazilian Portuguese copywriting prompt sent to the text
//! generation provider for a new catalog item.

/// Generates the prompt asking for a short promotional item description
///
/// # Arguments
///
/// * `name` - Item name
/// * `category` - Item category
/// * `keywords` - Free-text details or tags typed by the user
/// * `max_chars` - Maximum description length the model should produce
///
/// # Examples
///
/// ```
/// use ssmoveis::prompts::description_prompt::generate_description_prompt;
///
/// let prompt = generate_description_prompt("Cama Box King", "Quarto", "madeira maciça", 300);
/// assert!(prompt.contains("Nome do Item: Cama Box King"));
/// assert!(prompt.contains("máximo 300 caracteres"));
/// ```
pub fn generate_description_prompt(
    name: &str,
    category: &str,
    keywords: &str,
    max_chars: usize,
) -> String {
    format!(
        r#"Atue como um especialista em marketing e copywriting.
Escreva uma descrição atraente, profissional e curta (máximo {max_chars} caracteres) para um item de cadastro.

Nome do Item: {name}
Categoria: {category}
Detalhes/Tags: {keywords}

A resposta deve ser apenas o texto da descrição, em Português do Brasil. Sem aspas."#
    )
}
