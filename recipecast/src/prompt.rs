//! Recipe prompt rendering.
//!
//! The prompt is a fixed Jinja template rendered with minijinja. Values are
//! inserted verbatim: the template name carries no `.html` suffix, so
//! auto-escaping stays off.

use minijinja::{Environment, context};

use crate::error::Result;
use crate::recipe::CalorieLimit;

/// Name under which the recipe template is registered.
pub const RECIPE_TEMPLATE_NAME: &str = "recipe_prompt";

/// The recipe template.
pub const RECIPE_TEMPLATE: &str = "You are an experienced chef, create a recipe for the following \
food {{ food }} that is under {{ calories }} calories.";

/// Renders the recipe prompt for a food and calorie limit.
///
/// The output always contains `food` and the decimal calorie value exactly as given.
pub fn build_prompt(food: &str, calorie_limit: CalorieLimit) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(RECIPE_TEMPLATE_NAME, RECIPE_TEMPLATE)?;
    let template = env.get_template(RECIPE_TEMPLATE_NAME)?;

    let prompt = template.render(context! {
        food => food,
        calories => calorie_limit.get(),
    })?;

    Ok(prompt)
}
