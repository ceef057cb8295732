use asta_engine::{
    db_types::{InquiryKind, PaymentStatus, RegistrantInfo, Rupees},
    helpers::{calculate_payment_signature, PaymentSignature},
    ledger::{LedgerKind, LedgerValue},
    traits::LedgerWriter,
    InquiryForm,
    RegistrationFlowError,
    RegistrationForm,
};
use cucumber::{then, when};
use serde_json::json;

use crate::cucumber::{academy_world::KEY_SECRET, AcademyWorld};

fn email_for(name: &str) -> String {
    format!("{}@example.com", name.to_lowercase())
}

fn ledger_kind(key: &str) -> LedgerKind {
    LedgerKind::from_key(key).unwrap_or_else(|| panic!("Unknown ledger '{key}'"))
}

fn inquiry_kind(key: &str) -> InquiryKind {
    match key {
        "contact" => InquiryKind::Contact,
        "about" => InquiryKind::About,
        _ => panic!("Unknown inquiry kind '{key}'"),
    }
}

//-------------------------------------------  Checkout  -----------------------------------------------------------

#[when(expr = "{word} asks to register for {string} paying {string} rupees")]
async fn ask_to_register(world: &mut AcademyWorld, name: String, course: String, amount: String) {
    let form: RegistrationForm = serde_json::from_value(json!({
        "name": name,
        "email": email_for(&name),
        "phone": "9876543210",
        "course": course,
        "amount": amount,
    }))
    .unwrap();
    let result = world.system().checkout.create_order(form).await;
    world.last_checkout = Some(result);
}

#[then(expr = "the processor receives an order for {int} paise in {word}")]
async fn processor_receives_order(world: &mut AcademyWorld, paise: i64, currency: String) {
    let request = world.system().processor.last_request().expect("No order was requested");
    assert_eq!(request.amount, paise);
    assert_eq!(request.currency, currency);
    assert!(request.receipt.starts_with("receipt_"));
    let order = world.last_checkout.as_ref().unwrap().as_ref().expect("Checkout failed");
    assert_eq!(order.amount, paise);
    assert_eq!(order.key_id, "rzp_test_key");
}

#[then(expr = "the checkout description is {string}")]
async fn checkout_description(world: &mut AcademyWorld, description: String) {
    let order = world.last_checkout.as_ref().unwrap().as_ref().expect("Checkout failed");
    assert_eq!(order.description, description);
    assert_eq!(order.prefill.contact, order.student_info.phone);
}

#[then("the checkout is rejected")]
async fn checkout_rejected(world: &mut AcademyWorld) {
    let result = world.last_checkout.as_ref().expect("No checkout was attempted");
    assert!(result.is_err(), "Checkout should have failed: {result:?}");
    assert!(world.system().processor.last_request().is_none());
}

//------------------------------------------  Payments  ------------------------------------------------------------

async fn confirm(world: &mut AcademyWorld, payment: PaymentSignature, registrant: RegistrantInfo) {
    let result = world.system().registrations.confirm_payment(payment.clone(), registrant.clone()).await;
    world.last_confirmation = Some((payment, registrant));
    world.last_registration = Some(result);
}

fn payment_for(
    name: &str,
    rupees: i64,
    course: &str,
    payment_id: &str,
    order_id: &str,
) -> (PaymentSignature, RegistrantInfo) {
    let signature = calculate_payment_signature(KEY_SECRET, order_id, payment_id).unwrap();
    let payment = PaymentSignature::new(order_id, payment_id, signature.as_str());
    let registrant = RegistrantInfo {
        name: name.to_string(),
        email: email_for(name),
        phone: "9876543210".to_string(),
        course: course.to_string(),
        amount: Rupees::from_rupees(rupees),
    };
    (payment, registrant)
}

#[when(expr = "{word} pays {int} rupees for {string} with payment {word} on order {word}")]
async fn pays(
    world: &mut AcademyWorld,
    name: String,
    rupees: i64,
    course: String,
    payment_id: String,
    order_id: String,
) {
    let (payment, registrant) = payment_for(&name, rupees, &course, &payment_id, &order_id);
    confirm(world, payment, registrant).await;
}

#[when(expr = "{word} pays {int} rupees for {string} with payment {word} on order {word} but the signature is tampered")]
async fn pays_with_tampered_signature(
    world: &mut AcademyWorld,
    name: String,
    rupees: i64,
    course: String,
    payment_id: String,
    order_id: String,
) {
    let (mut payment, registrant) = payment_for(&name, rupees, &course, &payment_id, &order_id);
    let last = payment.signature.pop().unwrap();
    payment.signature.push(if last == 'a' { 'b' } else { 'a' });
    confirm(world, payment, registrant).await;
}

#[when("the same payment confirmation is replayed")]
async fn replay(world: &mut AcademyWorld) {
    let (payment, registrant) = world.last_confirmation.clone().expect("No confirmation to replay");
    confirm(world, payment, registrant).await;
}

#[then("the payment confirmation succeeds")]
async fn confirmation_succeeds(world: &mut AcademyWorld) {
    let result = world.last_registration.as_ref().expect("No confirmation was attempted");
    assert!(result.is_ok(), "Confirmation failed: {result:?}");
}

#[then("the payment confirmation is rejected as invalid")]
async fn confirmation_rejected(world: &mut AcademyWorld) {
    let result = world.last_registration.as_ref().expect("No confirmation was attempted");
    assert!(matches!(result, Err(RegistrationFlowError::InvalidSignature)), "Got {result:?}");
}

#[then("the payment confirmation fails after insert")]
async fn confirmation_fails_after_insert(world: &mut AcademyWorld) {
    let result = world.last_registration.as_ref().expect("No confirmation was attempted");
    match result {
        Err(e) => assert!(e.orphaned_id().is_some(), "Expected a post-insert failure, got {e:?}"),
        Ok(r) => panic!("Confirmation should have failed, but registration #{} was created", r.id),
    }
}

#[then(expr = "there is/are {int} registration(s)")]
async fn count_registrations(world: &mut AcademyWorld, count: usize) {
    let registrations = world.system().records.registrations().await.expect("Error fetching registrations");
    assert_eq!(registrations.len(), count);
}

#[then(expr = "registration {int} has payment status {string} and payment id {word}")]
async fn registration_status(world: &mut AcademyWorld, id: i64, status: String, payment_id: String) {
    let registrations = world.system().records.registrations().await.expect("Error fetching registrations");
    let r = registrations.iter().find(|r| r.id == id).expect("No such registration");
    assert_eq!(r.payment_status, status.parse::<PaymentStatus>().unwrap());
    assert_eq!(r.payment_id.as_deref(), Some(payment_id.as_str()));
}

#[then(expr = "the registrations are listed as {string}")]
async fn registrations_in_order(world: &mut AcademyWorld, names: String) {
    let registrations = world.system().records.registrations().await.expect("Error fetching registrations");
    let listed = registrations.iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join(", ");
    assert_eq!(listed, names);
}

//------------------------------------------  Inquiries  -----------------------------------------------------------

#[when(expr = "{word} sends a(n) {word} inquiry about {string} without a phone number")]
async fn send_inquiry_without_phone(world: &mut AcademyWorld, name: String, kind: String, subject: String) {
    send_inquiry(world, &name, &kind, &subject, None).await;
}

#[when(expr = "{word} sends a(n) {word} inquiry about {string} from phone {string}")]
async fn send_inquiry_with_phone(
    world: &mut AcademyWorld,
    name: String,
    kind: String,
    subject: String,
    phone: String,
) {
    send_inquiry(world, &name, &kind, &subject, Some(phone)).await;
}

async fn send_inquiry(world: &mut AcademyWorld, name: &str, kind: &str, subject: &str, phone: Option<String>) {
    let form = InquiryForm {
        name: Some(name.to_string()),
        email: Some(email_for(name)),
        phone,
        subject: Some(subject.to_string()),
        message: Some(format!("{name} would like to know about {subject}")),
    };
    let inquiry = form.validate().expect("Invalid inquiry form");
    let result = world.system().inquiries.submit(inquiry_kind(kind), inquiry).await;
    world.last_inquiry = Some(result);
}

#[then("the inquiry is accepted")]
async fn inquiry_accepted(world: &mut AcademyWorld) {
    let result = world.last_inquiry.as_ref().expect("No inquiry was submitted");
    assert!(result.is_ok(), "Inquiry failed: {result:?}");
}

#[then("the inquiry fails after insert")]
async fn inquiry_fails_after_insert(world: &mut AcademyWorld) {
    let result = world.last_inquiry.as_ref().expect("No inquiry was submitted");
    assert!(result.is_err(), "Inquiry should have failed");
}

#[then(expr = "there is/are {int} {word} inquiry/inquiries")]
async fn count_inquiries(world: &mut AcademyWorld, count: usize, kind: String) {
    let inquiries = world.system().records.inquiries(inquiry_kind(&kind)).await.expect("Error fetching inquiries");
    assert_eq!(inquiries.len(), count);
}

//------------------------------------------  Ledgers  -------------------------------------------------------------

#[then(expr = "the {word} ledger has {int} row(s)")]
async fn ledger_rows(world: &mut AcademyWorld, key: String, count: usize) {
    let rows = world.system().ledger.read_all(ledger_kind(&key)).await.expect("Error reading ledger");
    assert_eq!(rows.len(), count);
}

#[then(expr = "{word} ledger row {int} has {string} set to {string}")]
async fn ledger_cell(world: &mut AcademyWorld, key: String, row: usize, column: String, value: String) {
    let rows = world.system().ledger.read_all(ledger_kind(&key)).await.expect("Error reading ledger");
    let record = rows.get(row - 1).expect("No such ledger row");
    assert_eq!(record.get(&column), Some(&LedgerValue::Text(value)));
}

#[then(expr = "{word} ledger row {int} has no {string} column")]
async fn ledger_no_column(world: &mut AcademyWorld, key: String, row: usize, column: String) {
    let rows = world.system().ledger.read_all(ledger_kind(&key)).await.expect("Error reading ledger");
    let record = rows.get(row - 1).expect("No such ledger row");
    assert!(record.get(&column).is_none());
}

#[then(expr = "students ledger row {int} matches registration {int}")]
async fn ledger_matches_registration(world: &mut AcademyWorld, row: usize, id: i64) {
    let rows = world.system().ledger.read_all(LedgerKind::Students).await.expect("Error reading ledger");
    let record = rows.get(row - 1).expect("No such ledger row");
    let registrations = world.system().records.registrations().await.expect("Error fetching registrations");
    let r = registrations.iter().find(|r| r.id == id).expect("No such registration");
    #[allow(clippy::cast_precision_loss)]
    let expected_id = r.id as f64;
    assert_eq!(record.get("ID"), Some(&LedgerValue::Number(expected_id)));
    assert_eq!(record.get("Name"), Some(&LedgerValue::Text(r.name.clone())));
    assert_eq!(record.get("Email"), Some(&LedgerValue::Text(r.email.clone())));
    assert_eq!(record.get("Course"), Some(&LedgerValue::Text(r.course.clone())));
    assert_eq!(record.get("Amount"), Some(&LedgerValue::Number(r.amount.as_f64())));
    assert_eq!(record.get("Payment Status"), Some(&LedgerValue::Text("successful".into())));
}

#[then(expr = "the download for {string} is available")]
async fn download_available(world: &mut AcademyWorld, key: String) {
    let (kind, path) = world.system().records.ledger_file(&key).expect("Ledger should be downloadable");
    assert_eq!(path.file_name().and_then(|f| f.to_str()), Some(kind.file_name()));
    assert!(path.starts_with(world.system().ledger_dir.path()));
}

#[then(expr = "the download for {string} is not available")]
async fn download_not_available(world: &mut AcademyWorld, key: String) {
    assert!(world.system().records.ledger_file(&key).is_none());
}

//------------------------------------------  Emails  --------------------------------------------------------------

#[then(expr = "{int} email(s) has/have been sent to {word}")]
async fn emails_sent(world: &mut AcademyWorld, count: usize, to: String) {
    let sent = world.system().notifier.sent();
    assert_eq!(sent.iter().filter(|e| e.to == to).count(), count, "Sent: {sent:?}");
}

#[then("no emails have been sent")]
async fn no_emails(world: &mut AcademyWorld) {
    assert!(world.system().notifier.sent().is_empty());
}

#[then(expr = "the last email subject is {string}")]
async fn last_email_subject(world: &mut AcademyWorld, subject: String) {
    let sent = world.system().notifier.sent();
    let last = sent.last().expect("No emails were sent");
    assert_eq!(last.subject, subject);
}
