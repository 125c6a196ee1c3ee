use crate::support::{print_json, read_text_or_exit, yes_no};
use premsel_proof::extract_verdict;

pub fn run(input: String, json_output: bool) {
    let stdout = read_text_or_exit(&input);
    let verdict = extract_verdict(&stdout);

    if json_output {
        print_json(&verdict);
        return;
    }

    println!("premsel extract {input}");
    println!("  status: {}", verdict.status());
    println!("  proved: {}", yes_no(verdict.is_proved()));
    println!("  positive axioms: {}", verdict.positive_axioms().len());
    for name in verdict.positive_axioms() {
        println!("    - {name}");
    }
}
