/// Simple example of using the depositor library
///
/// Run with:
/// ```
/// cargo run --example simple
/// ```
use depositor::api::Predictor;
use depositor::pipeline::form::assemble;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Depositor Term Deposit Predictor - Simple Example\n");

    println!("Loading model...");
    let predictor = Predictor::new()?;
    println!("✓ {}\n", predictor.model_info());

    let customers = vec![
        ("Form defaults", vec![]),
        (
            "Long call, earlier success",
            vec![("duration", "900"), ("poutcome", "success"), ("pdays", "6")],
        ),
        (
            "Retired, telephone contact",
            vec![("age", "67"), ("job", "retired"), ("contact", "telephone")],
        ),
    ];

    println!("{}", "=".repeat(70));
    for (name, overrides) in customers {
        let record = assemble(overrides)?;
        let result = predictor.predict(&record)?;

        println!("\nCustomer: {}", name);
        println!(
            "Predicted: {} (confidence: {:.1}%)",
            result.outcome,
            result.confidence() * 100.0
        );
        println!(
            "P(not subscribed) = {:.4}, P(subscribed) = {:.4}",
            result.probabilities[0], result.probabilities[1]
        );
        println!("{}", "-".repeat(70));
    }

    // Values outside the form's choices never reach the model.
    let mut record = depositor::FeatureRecord::default();
    record.job = "astronaut".to_string();
    match predictor.predict(&record) {
        Ok(_) => println!("\nunexpected: out-of-domain job accepted"),
        Err(e) => println!("\nRejected as expected: {}", e),
    }

    println!("\n✓ Done!");
    Ok(())
}
