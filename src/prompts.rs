//! Prompt rendering for the three planning stages

use chrono::{NaiveDate, Weekday};

use crate::models::date::DATE_FORMAT;

/// Date resolution prompt with few-shot examples of relative expressions
#[must_use]
pub fn date_prompt(today: NaiveDate, weekday: Weekday, expression: &str) -> String {
    let today_str = today.format(DATE_FORMAT);
    let today_weekday = weekday_name(weekday);
    format!(
        r#"You are an expert assistant that converts natural language date inputs into a concrete date format (dd/mm/yyyy).

----------------------------------------
Here are some examples:

user: Next saturday
system: 05/04/2025

user: Next monday
system: 07/04/2025

user: Next wednesday
system: 09/04/2025
----------------------------------------

Today is {today_str}, and it is a {today_weekday}.

Given this information, convert the following date expression to its actual date:

Natural language input: "{expression}"

Output format: "dd/mm/yyyy"
"#
    )
}

/// Destination summary prompt grounded on raw search results
#[must_use]
pub fn destination_prompt(city: &str, search_results: &str) -> String {
    format!(
        r#"You are a travel assistant. Based on the following search results, summarize the main highlights of the city "{city}".

Include historical places, cultural attractions, and popular locations. Limit it to 4-5 sentences.

Search Results:
{search_results}
"#
    )
}

/// Everything the itinerary prompt embeds
#[derive(Debug, Clone, Copy)]
pub struct ItineraryInputs<'a> {
    pub travel_date: &'a str,
    pub city: &'a str,
    pub city_summary: &'a str,
    /// Canonical time-of-day label shown next to the forecast, e.g. `18:00`
    pub forecast_time: &'a str,
    pub forecast: &'a str,
    pub lodging: &'a str,
    pub base_currency: &'a str,
    pub target_currency: &'a str,
    pub rates: &'a str,
}

/// Final itinerary prompt
#[must_use]
pub fn itinerary_prompt(inputs: &ItineraryInputs<'_>) -> String {
    let ItineraryInputs {
        travel_date,
        city,
        city_summary,
        forecast_time,
        forecast,
        lodging,
        base_currency,
        target_currency,
        rates,
    } = inputs;
    format!(
        r#"You are a travel assistant that helps users create a complete travel plan.

The user has provided the following information:

- Travel Date: {travel_date}
- City: {city}, {city_summary}
- Weather Forecast ({forecast_time}) for the next days: {forecast}
- Hotels in the city: {lodging}
- Currency Exchange Rates ({base_currency} to other currencies): {rates}

Using this information, create a detailed travel plan for the user. Include:
- A general overview of the city, including top attractions and culture.
- Suggestions for places to visit and clothing recommendations based on the given weather forecast.
- Hotel suggestions based on budget and location.
- Currency exchange tips to help with budgeting for the trip ({target_currency}).
"#
    )
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
