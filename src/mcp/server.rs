//! Macrolog MCP Server Implementation
//!
//! Implements the MCP server with all Macrolog tools.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;

use crate::db::Database;
use crate::fdc::FdcClient;
use crate::models::{FoodLogCreate, FoodLogUpdate, MealType, NutritionTotals};
use crate::tools::{days, food_logs, goals, nutrients, status};

/// Macrolog MCP Service
#[derive(Clone)]
pub struct MacrologService {
    database: Database,
    tool_router: ToolRouter<MacrologService>,
}

impl MacrologService {
    pub fn new(database: Database) -> Self {
        Self {
            database,
            tool_router: Self::tool_router(),
        }
    }
}

/// Run a FoodData Central call on the blocking thread pool
///
/// The client is blocking reqwest; building, using, or dropping it on a
/// runtime thread aborts the process, so its whole lifetime stays inside
/// the closure.
async fn with_fdc_client<T, F>(f: F) -> Result<T, McpError>
where
    T: Send + 'static,
    F: FnOnce(&FdcClient) -> Result<T, String> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let client = FdcClient::from_env().map_err(|e| e.to_string())?;
        f(&client)
    })
    .await
    .map_err(|e| McpError::internal_error(e.to_string(), None))?
    .map_err(|e| McpError::internal_error(e, None))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodParams {
    /// Date to log against (YYYY-MM-DD)
    pub date: String,
    /// Meal type: breakfast, lunch, dinner, snack, or unspecified
    #[serde(default)]
    pub meal_type: Option<String>,
    /// Food name
    pub name: String,
    /// Calories per serving (kcal)
    pub calories: Option<f64>,
    /// Protein per serving (g)
    pub protein: Option<f64>,
    /// Carbohydrates per serving (g)
    pub carbs: Option<f64>,
    /// Fat per serving (g)
    pub fat: Option<f64>,
    /// Fiber per serving (g)
    pub fiber: Option<f64>,
    /// Sodium per serving (mg)
    pub sodium: Option<f64>,
    /// Servings consumed (default 1)
    pub quantity: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodFromFdcParams {
    /// Date to log against (YYYY-MM-DD)
    pub date: String,
    /// FoodData Central food ID
    pub fdc_id: i64,
    /// Meal type: breakfast, lunch, dinner, snack, or unspecified
    #[serde(default)]
    pub meal_type: Option<String>,
    /// Servings consumed (default 1)
    pub quantity: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFoodNutrientsParams {
    /// FoodData Central food ID
    pub fdc_id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    /// Free-text food search query
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

fn default_search_limit() -> i64 { 10 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// Date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDaysParams {
    /// Start date inclusive (YYYY-MM-DD, optional)
    pub start_date: Option<String>,
    /// End date inclusive (YYYY-MM-DD, optional)
    pub end_date: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 30 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFoodLogParams {
    /// Food log ID to update
    pub id: i64,
    pub meal_type: Option<String>,
    pub name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sodium: Option<f64>,
    pub quantity: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteFoodLogParams {
    /// Food log ID to delete
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetGoalParams {
    /// Daily calorie target (kcal)
    pub calories: f64,
    /// Daily protein target (g)
    pub protein: f64,
    /// Daily carbohydrate target (g)
    pub carbs: f64,
    /// Daily fat target (g)
    pub fat: f64,
    /// Daily fiber target (g)
    pub fiber: f64,
    /// Daily sodium limit (mg)
    pub sodium: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDashboardParams {
    /// Date (YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutrientInfoParams {
    /// Canonical nutrient key (e.g. "calories", "vitamin_c", "iron")
    pub key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PreviewTotalsParams {
    /// Raw log rows: objects with calories/protein/carbs/fat/fiber/sodium/quantity,
    /// values as numbers, numeric strings, or null
    pub logs: Vec<serde_json::Value>,
}

fn json_response<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MacrologService {
    // --- Status ---

    #[tool(description = "Get the current status of the Macrolog service including build info and database state")]
    fn macrolog_status(&self) -> Result<CallToolResult, McpError> {
        let result = status::status(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_response(&result)
    }

    // --- Food Logs ---

    #[tool(description = "Log a food with hand-entered nutrient values for a given date. Returns the entry and the day's updated totals.")]
    fn log_food(&self, Parameters(p): Parameters<LogFoodParams>) -> Result<CallToolResult, McpError> {
        let data = FoodLogCreate {
            meal_type: p.meal_type.as_deref().map(MealType::from_str).unwrap_or(MealType::Unspecified),
            name: p.name,
            fdc_id: None,
            calories: p.calories, protein: p.protein, carbs: p.carbs,
            fat: p.fat, fiber: p.fiber, sodium: p.sodium,
            quantity: p.quantity,
            notes: p.notes,
        };
        let result = food_logs::log_food(&self.database, &p.date, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_response(&result)
    }

    #[tool(description = "Log a food by its FoodData Central ID. Fetches nutrient data, extracts the canonical values, and logs it for the date.")]
    async fn log_food_from_fdc(&self, Parameters(p): Parameters<LogFoodFromFdcParams>) -> Result<CallToolResult, McpError> {
        let db = self.database.clone();
        let meal_type = p.meal_type.as_deref().map(MealType::from_str).unwrap_or(MealType::Unspecified);
        let result = with_fdc_client(move |client| {
            food_logs::log_food_from_fdc(
                &db, client, &p.date, p.fdc_id, meal_type, p.quantity, p.notes,
            )
        })
        .await?;
        json_response(&result)
    }

    #[tool(description = "Update a food log entry's values or quantity. The day's cached totals are recalculated.")]
    fn update_food_log(&self, Parameters(p): Parameters<UpdateFoodLogParams>) -> Result<CallToolResult, McpError> {
        let data = FoodLogUpdate {
            meal_type: p.meal_type.as_deref().map(MealType::from_str),
            name: p.name,
            calories: p.calories, protein: p.protein, carbs: p.carbs,
            fat: p.fat, fiber: p.fiber, sodium: p.sodium,
            quantity: p.quantity,
            notes: p.notes,
        };
        let result = food_logs::update_food_log(&self.database, p.id, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_response(&result)
    }

    #[tool(description = "Delete a food log entry. The day's cached totals are recalculated.")]
    fn delete_food_log(&self, Parameters(p): Parameters<DeleteFoodLogParams>) -> Result<CallToolResult, McpError> {
        let result = food_logs::delete_food_log(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_response(&result)
    }

    // --- FoodData Central ---

    #[tool(description = "Fetch a food from FoodData Central and return its extracted nutrient bundle with display labels. Only nutrients the database reported are included.")]
    async fn get_food_nutrients(&self, Parameters(p): Parameters<GetFoodNutrientsParams>) -> Result<CallToolResult, McpError> {
        let result = with_fdc_client(move |client| nutrients::get_food_nutrients(client, p.fdc_id)).await?;
        json_response(&result)
    }

    #[tool(description = "Search FoodData Central for foods by name")]
    async fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = with_fdc_client(move |client| nutrients::search_foods(client, &p.query, p.limit)).await?;
        json_response(&result)
    }

    // --- Days ---

    #[tool(description = "Get a day's food logs grouped by meal with aggregated totals")]
    fn get_day(&self, Parameters(p): Parameters<GetDayParams>) -> Result<CallToolResult, McpError> {
        let result = days::get_day(&self.database, &p.date)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => json_response(&detail),
            None => Ok(CallToolResult::success(vec![Content::text(format!(
                r#"{{"error": "No logs for date", "date": "{}"}}"#,
                p.date
            ))])),
        }
    }

    #[tool(description = "List days with their cached nutrition totals, most recent first")]
    fn list_days(&self, Parameters(p): Parameters<ListDaysParams>) -> Result<CallToolResult, McpError> {
        let result = days::list_days(
            &self.database,
            p.start_date.as_deref(),
            p.end_date.as_deref(),
            p.limit,
            p.offset,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_response(&result)
    }

    #[tool(description = "Get the dashboard for a date: day totals plus progress against the daily goal. Returns totals even when no goal is set.")]
    fn get_dashboard(&self, Parameters(p): Parameters<GetDashboardParams>) -> Result<CallToolResult, McpError> {
        let result = days::get_dashboard(&self.database, &p.date)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_response(&result)
    }

    // --- Goals ---

    #[tool(description = "Set the daily nutrient targets")]
    fn set_goal(&self, Parameters(p): Parameters<SetGoalParams>) -> Result<CallToolResult, McpError> {
        let targets = NutritionTotals {
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
            fiber: p.fiber,
            sodium: p.sodium,
        };
        let result = goals::set_goal(&self.database, targets)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_response(&result)
    }

    #[tool(description = "Get the current daily nutrient targets")]
    fn get_goal(&self) -> Result<CallToolResult, McpError> {
        let result = goals::get_goal(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(goal) => json_response(&goal),
            None => Ok(CallToolResult::success(vec![Content::text(
                r#"{"error": "No goal set"}"#.to_string(),
            )])),
        }
    }

    // --- Nutrient catalog ---

    #[tool(description = "Look up display info (label, unit, category) for a canonical nutrient key")]
    fn nutrient_info(&self, Parameters(p): Parameters<NutrientInfoParams>) -> Result<CallToolResult, McpError> {
        let result = nutrients::nutrient_info(&p.key)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_response(&result)
    }

    #[tool(description = "Aggregate raw JSON log rows into totals without persisting anything. Field values may be numbers, numeric strings, or null.")]
    fn preview_totals(&self, Parameters(p): Parameters<PreviewTotalsParams>) -> Result<CallToolResult, McpError> {
        let result = nutrients::preview_totals(&p.logs);
        json_response(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MacrologService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "macrolog".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Macrolog".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Macrolog - food logging and nutrition tracking. \
                 Logging: log_food (hand-entered values), log_food_from_fdc (by FoodData Central ID), \
                 update_food_log, delete_food_log. \
                 Lookup: search_foods, get_food_nutrients, nutrient_info. \
                 Days: get_day, list_days, get_dashboard. \
                 Goals: set_goal, get_goal. \
                 Utility: preview_totals (aggregate without persisting), macrolog_status. \
                 Dates are ISO YYYY-MM-DD. Quantity is a servings multiplier; omit for 1."
                    .into(),
            ),
        }
    }
}
