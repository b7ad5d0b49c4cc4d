//! Runs the seven derived-metric queries and renders their answers.

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    cli::AnswerArgs,
    collection::RecordList,
    error::QueryResult,
    loader, queries, table,
};

pub const QUESTIONS: [&str; 7] = [
    "How many countries are in the dataset?",
    "Which rows describe Mexico?",
    "Which countries emitted more CO2 per capita than the United States in 1990?",
    "Which countries emitted more CO2 per capita than the United States in 2020?",
    "What was the approximate population of Luxembourg in 2014 (millions)?",
    "By what factor did China's electricity and heat emissions grow from 1990 to 2020?",
    "What will China's electricity and heat emissions be in 2070 at the same growth rate?",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Count(usize),
    Rows(Vec<RowRef>),
    Countries(Vec<String>),
    Number(f64),
    NoResult,
}

/// Identifies one matched record in an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowRef {
    pub country: String,
    pub year: i64,
}

impl Answer {
    fn rows(rows: Option<RecordList>) -> Self {
        match rows {
            Some(list) => Answer::Rows(
                list.iter()
                    .map(|r| RowRef {
                        country: r.name.clone(),
                        year: r.year,
                    })
                    .collect(),
            ),
            None => Answer::NoResult,
        }
    }

    fn countries(rows: Option<RecordList>) -> Self {
        match rows {
            Some(list) => Answer::Countries(list.iter().map(|r| r.name.clone()).collect()),
            None => Answer::NoResult,
        }
    }

    fn number(value: Option<f64>) -> Self {
        value.map_or(Answer::NoResult, Answer::Number)
    }

    pub fn as_display(&self) -> String {
        match self {
            Answer::Count(n) => n.to_string(),
            Answer::Rows(rows) if rows.is_empty() => "(none)".to_string(),
            Answer::Rows(rows) => rows
                .iter()
                .map(|r| format!("{} {}", r.country, r.year))
                .collect::<Vec<_>>()
                .join(", "),
            Answer::Countries(names) if names.is_empty() => "(none)".to_string(),
            Answer::Countries(names) => names.join(", "),
            Answer::Number(value) => table::format_number(*value),
            Answer::NoResult => "no result".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnswer {
    pub query: u8,
    pub question: &'static str,
    pub answer: Answer,
}

/// Answers question `query` (1-7). Other numbers yield `None`.
pub fn evaluate(rows: &RecordList, query: u8) -> QueryResult<Option<QueryAnswer>> {
    let answer = match query {
        1 => Answer::Count(queries::country_count(rows)?),
        2 => Answer::rows(queries::mexico_rows(rows)?),
        3 => Answer::countries(queries::above_us_per_capita_1990(rows)?),
        4 => Answer::countries(queries::above_us_per_capita_2020(rows)?),
        5 => Answer::number(queries::luxembourg_population_2014(rows)?),
        6 => Answer::number(queries::china_electricity_multiplier(rows)?),
        7 => Answer::number(queries::china_electricity_projection(rows)?),
        _ => return Ok(None),
    };
    Ok(Some(QueryAnswer {
        query,
        question: QUESTIONS[usize::from(query) - 1],
        answer,
    }))
}

pub fn answer_all(rows: &RecordList) -> QueryResult<Vec<QueryAnswer>> {
    (1..=7u8)
        .filter_map(|query| evaluate(rows, query).transpose())
        .collect()
}

pub fn execute(args: &AnswerArgs) -> Result<()> {
    let rows = loader::load_records(&args.input, &args.source.load_options())?;
    let answers = match args.query {
        Some(query) => evaluate(&rows, query)
            .with_context(|| format!("Answering query {query}"))?
            .into_iter()
            .collect(),
        None => answer_all(&rows).context("Answering queries")?,
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(&answers).context("Serializing answers")?;
        println!("{rendered}");
    } else {
        let headers = vec![
            "query".to_string(),
            "question".to_string(),
            "answer".to_string(),
        ];
        let body = answers
            .iter()
            .map(|a| vec![a.query.to_string(), a.question.to_string(), a.answer.as_display()])
            .collect::<Vec<_>>();
        table::print_table(&headers, &body);
    }
    info!(
        "Answered {} quer{} over {} record(s)",
        answers.len(),
        if answers.len() == 1 { "y" } else { "ies" },
        rows.len()
    );
    Ok(())
}
