//! UI strings for the table, selected once per table by language code.
//!
//! The locale is passed explicitly to every component that renders text; there
//! is no ambient or global locale.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported table languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Pt]
    }

    pub fn locale(&self) -> &'static Locale {
        match self {
            Language::En => &EN,
            Language::Pt => &PT,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pt" => Ok(Language::Pt),
            other => Err(ConfigError::UnknownLanguage {
                code: other.to_string(),
            }),
        }
    }
}

/// Arguments of the column-moved announcement. Indices are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovedColumn<'a> {
    pub label: &'a str,
    pub previous_index: usize,
    pub current_index: usize,
    pub number_of_items: usize,
}

/// Localized strings used by the table components.
#[derive(Debug, PartialEq, Eq)]
pub struct Locale {
    pub language: Language,

    // Table body
    pub no_results: &'static str,

    // Number filter conditions
    pub condition_is_equal_to: &'static str,
    pub condition_is_between: &'static str,
    pub condition_is_greater_than: &'static str,
    pub condition_is_less_than: &'static str,

    // Filter UI
    pub filter_label_and: &'static str,
    pub select_placeholder: &'static str,
    pub select_condition_placeholder: &'static str,
    pub number_input_placeholder: &'static str,
    pub range_and: &'static str,
    filter_by_prefix: &'static str,
    pub apply: &'static str,
    pub reset: &'static str,

    // Filter bar toolbar
    search_by_prefix: &'static str,
    pub clear_filters: &'static str,
    pub export: &'static str,

    // Pagination
    pub first_page: &'static str,
    pub previous_page: &'static str,
    pub next_page: &'static str,
    pub last_page: &'static str,
    pub rows_selected: &'static str,
    pub showing: &'static str,
    pub of: &'static str,

    // Row / bulk actions
    pub add: &'static str,
    pub edit: &'static str,
    pub delete: &'static str,
    pub selected: &'static str,

    // View options
    pub view: &'static str,
    pub display_properties: &'static str,
    reorder_prefix: &'static str,
    moved_template: MovedTemplate,
}

#[derive(Debug, PartialEq, Eq)]
struct MovedTemplate {
    lead: &'static str,
    from: &'static str,
    to: &'static str,
    of: &'static str,
}

impl Locale {
    /// "Filter by <title>".
    pub fn filter_by(&self, title: &str) -> String {
        format!("{} {}", self.filter_by_prefix, title)
    }

    /// "Search by <title>..." with the title lower-cased.
    pub fn search_by(&self, title: &str) -> String {
        format!("{} {}...", self.search_by_prefix, title.to_lowercase())
    }

    /// "Reorder <label>".
    pub fn reorder_column(&self, label: &str) -> String {
        format!("{} {}", self.reorder_prefix, label)
    }

    /// Announcement after a column moved; positions are rendered one-based.
    pub fn moved_column(&self, args: MovedColumn<'_>) -> String {
        let t = &self.moved_template;
        format!(
            "{} {} {} {} {} {} {}.",
            t.lead,
            args.label,
            t.from,
            args.previous_index + 1,
            t.to,
            args.current_index + 1,
            format_args!("{} {}", t.of, args.number_of_items),
        )
    }
}

pub static EN: Locale = Locale {
    language: Language::En,
    no_results: "No results.",

    condition_is_equal_to: "is equal to",
    condition_is_between: "is between",
    condition_is_greater_than: "is greater than",
    condition_is_less_than: "is less than",

    filter_label_and: "and",
    select_placeholder: "Select",
    select_condition_placeholder: "Select condition",
    number_input_placeholder: "$0",
    range_and: "and",
    filter_by_prefix: "Filter by",
    apply: "Apply",
    reset: "Reset",

    search_by_prefix: "Search by",
    clear_filters: "Clear filters",
    export: "Export",

    first_page: "First page",
    previous_page: "Previous page",
    next_page: "Next page",
    last_page: "Last page",
    rows_selected: "row(s) selected.",
    showing: "Showing",
    of: "of",

    add: "Add",
    edit: "Edit",
    delete: "Delete",
    selected: "selected",

    view: "View",
    display_properties: "Display properties",
    reorder_prefix: "Reorder",
    moved_template: MovedTemplate {
        lead: "You've moved",
        from: "from position",
        to: "to position",
        of: "of",
    },
};

pub static PT: Locale = Locale {
    language: Language::Pt,
    no_results: "Sem resultados.",

    condition_is_equal_to: "é igual a",
    condition_is_between: "está entre",
    condition_is_greater_than: "é maior que",
    condition_is_less_than: "é menor que",

    filter_label_and: "e",
    select_placeholder: "Selecionar",
    select_condition_placeholder: "Selecionar condição",
    number_input_placeholder: "$0",
    range_and: "e",
    filter_by_prefix: "Filtrar por",
    apply: "Aplicar",
    reset: "Redefinir",

    search_by_prefix: "Buscar por",
    clear_filters: "Limpar filtros",
    export: "Exportar",

    first_page: "Primeira página",
    previous_page: "Página anterior",
    next_page: "Próxima página",
    last_page: "Última página",
    rows_selected: "linha(s) selecionada(s).",
    showing: "Exibindo",
    of: "de",

    add: "Adicionar",
    edit: "Editar",
    delete: "Excluir",
    selected: "selecionado(s)",

    view: "Visualizar",
    display_properties: "Propriedades de exibição",
    reorder_prefix: "Reordenar",
    moved_template: MovedTemplate {
        lead: "Você moveu",
        from: "da posição",
        to: "para a posição",
        of: "de",
    },
};
