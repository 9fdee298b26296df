//! Interactive prompts
//!
//! Each prompt shows its default in brackets and takes it on an empty answer.
//! Invalid answers are re-asked until they parse; the collected config is then
//! validated once by the caller. Only the line ending is stripped from an
//! answer, so numbers padded with spaces are re-asked.

use std::io::{self, BufRead, Write};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::series::InvestmentType;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask with a bracketed default; an empty answer takes the default
    pub fn default_input(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer = self.ask(&format!("{prompt} [{default}]: "))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    pub fn investment_type(&mut self) -> Result<InvestmentType> {
        for investment_type in InvestmentType::ALL {
            writeln!(
                self.output,
                "   {} = {}",
                investment_type.key(),
                investment_type.description()
            )?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "Press ENTER to take the default value in brackets")?;
        writeln!(self.output)?;

        let mut answer = self.default_input(
            "Enter investment type: (stocks, bonds, sb_blend, sbc_blend):\n",
            InvestmentType::default().key(),
        )?;
        loop {
            if let Ok(investment_type) = answer.parse::<InvestmentType>() {
                return Ok(investment_type);
            }
            answer = self.ask("Invalid input. Enter investment type: ")?;
        }
    }

    /// Ask for a non-negative whole number, re-asking until the answer is all digits
    pub fn whole_number<T>(&mut self, prompt: &str, retry: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr + ToString,
    {
        let mut answer = self.default_input(prompt, &default.to_string())?;
        loop {
            if is_digits(&answer) {
                if let Ok(value) = answer.parse() {
                    return Ok(value);
                }
            }
            answer = self.ask(&format!("Invalid input. {retry}: "))?;
        }
    }

    /// Ask for every field in order; the result is not yet validated
    pub fn collect(&mut self) -> Result<(InvestmentType, SimulationConfig)> {
        let defaults = SimulationConfig::default();
        let investment_type = self.investment_type()?;

        let start_value = self.whole_number(
            "Enter starting value of investment:\n",
            "Enter starting value of investment",
            defaults.start_value,
        )?;
        let annual_withdrawal = self.whole_number(
            "Enter annual pre-tax withdrawal (today's $):\n",
            "Enter annual pre-tax withdrawal",
            defaults.annual_withdrawal,
        )?;
        let min_years = self.whole_number(
            "Enter minimum years in retirement:\n",
            "Enter minimum years in retirement",
            defaults.min_years,
        )?;
        let most_likely_years = self.whole_number(
            "Enter most likely years in retirement:\n",
            "Enter most likely years in retirement",
            defaults.most_likely_years,
        )?;
        let max_years = self.whole_number(
            "Enter maximum years in retirement:\n",
            "Enter maximum years in retirement",
            defaults.max_years,
        )?;
        let trial_count = self.whole_number(
            "Enter number of cases to run:\n",
            "Enter number of cases to run",
            defaults.trial_count,
        )?;

        Ok((
            investment_type,
            SimulationConfig {
                start_value,
                annual_withdrawal,
                min_years,
                most_likely_years,
                max_years,
                trial_count,
            },
        ))
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}
