//! Demo binary: drives a two-step signup wizard (account -> billing)
//! end to end, including one rejected submit and the keyed registry.

use std::rc::Rc;

use async_trait::async_trait;
use form_core::{BehaviorOptions, FieldEvent, FormConfig, Issue, Schema, Validation};
use form_flow::{
    FlowError, MultiParticipant, Navigator, ParticipantConfig, StepConfig, StepRecord,
};
use indexmap::IndexMap;
use serde_json::{json, Value};

/// Navigation adapter that just reports where the router would go.
struct PrintNavigator;

#[async_trait(?Send)]
impl Navigator for PrintNavigator {
    async fn navigate(&self, route: &str) -> Result<(), FlowError> {
        println!("  -> navigate {route}");
        Ok(())
    }
}

fn account_schema() -> Rc<dyn Schema<Value>> {
    Rc::new(|input: &Value| {
        let mut issues = Vec::new();
        let email = input.get("email").and_then(Value::as_str).unwrap_or("");
        if email.is_empty() {
            issues.push(Issue::field("email", "email is required"));
        } else if !email.contains('@') {
            issues.push(Issue::field("email", "email must contain @"));
        }
        Validation::from_issues(issues)
    })
}

fn billing_schema() -> Rc<dyn Schema<Value>> {
    Rc::new(|input: &Value| {
        let plan = input.get("plan").and_then(Value::as_str).unwrap_or("");
        let mut issues = Vec::new();
        if !matches!(plan, "free" | "pro") {
            issues.push(Issue::field("plan", "plan must be 'free' or 'pro'"));
        }
        Validation::from_issues(issues)
    })
}

fn behaviors(fields: &[&str]) -> IndexMap<String, BehaviorOptions> {
    fields
        .iter()
        .map(|f| (f.to_string(), BehaviorOptions::default()))
        .collect()
}

fn wizard_config() -> ParticipantConfig {
    let mut steps = IndexMap::new();
    steps.insert(
        "account".to_string(),
        StepConfig {
            form: FormConfig { schema: account_schema(), behavior: behaviors(&["email"]) },
            route: "/signup/account".to_string(),
        },
    );
    steps.insert(
        "billing".to_string(),
        StepConfig {
            form: FormConfig { schema: billing_schema(), behavior: behaviors(&["plan"]) },
            route: "/signup/billing".to_string(),
        },
    );

    ParticipantConfig {
        steps,
        flow: vec!["account".to_string(), "billing".to_string()],
        complete_route: "/signup/done".to_string(),
        abort_route: "/".to_string(),
        navigator: Rc::new(PrintNavigator),
        submit_hook: None,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), FlowError> {
    let registry = MultiParticipant::new(wizard_config(), IndexMap::new());
    let mut participant = registry.get_or_create("user1", StepRecord::new())?;

    println!("account step:");
    let mut account = participant.form("account", json!({ "email": "" }))?;

    // The user types an invalid address, then leaves the field.
    account.field_event("email", FieldEvent::Edit);
    account.update(|input| input["email"] = json!("not-an-address"));
    account.tick();
    account.field_event("email", FieldEvent::Blur);
    if let Some(behavior) = account.behavior("email") {
        if behavior.error_visible() {
            println!("  email error: {:?}", behavior.issue_text);
        }
    }

    // Submitting in this state is refused.
    let submitted = participant.submit("account", &mut account).await?;
    println!("  submit with invalid email accepted: {submitted}");

    // Fix the address and retry.
    account.field_event("email", FieldEvent::Edit);
    account.update(|input| input["email"] = json!("ada@example.org"));
    account.tick();
    participant.submit("account", &mut account).await?;

    println!("billing step:");
    let mut billing = participant.form("billing", json!({ "plan": "pro" }))?;
    participant.submit("billing", &mut billing).await?;

    println!("registry snapshot:");
    let snapshot = registry.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot).expect("snapshot serializes"));

    // Coming back later: the participant is reseeded from the registry.
    let revived = registry.get_or_create("user1", StepRecord::new())?;
    println!(
        "revived participant has account output: {}",
        revived.input().contains_key("account")
    );
    println!("back from billing would go to: {}", revived.back_href("billing")?);

    Ok(())
}
