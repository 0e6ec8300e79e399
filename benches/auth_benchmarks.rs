use axum::http::{header, HeaderMap, HeaderValue};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use studentportal::auth::{authenticate, extract_credential, issue_token, verify_token, Role};
use studentportal::directory::UserDirectory;
use studentportal::Identity;

const SECRET: &[u8] = b"bench-secret";

fn student() -> Identity {
    Identity {
        username: "student".to_string(),
        full_name: "Student User".to_string(),
        role: Role::Student,
        department: "BCA".to_string(),
        semester: Some(5),
    }
}

fn bench_token_issue(c: &mut Criterion) {
    let identity = student();

    c.bench_function("token_issue", |b| {
        b.iter(|| issue_token(black_box(&identity), SECRET, 3600))
    });
}

fn bench_token_verify(c: &mut Criterion) {
    let token = issue_token(&student(), SECRET, 3600).unwrap();

    c.bench_function("token_verify", |b| {
        b.iter(|| verify_token(black_box(&token), SECRET))
    });

    c.bench_function("token_verify_wrong_key", |b| {
        b.iter(|| verify_token(black_box(&token), b"some-other-key"))
    });
}

fn bench_gateway(c: &mut Criterion) {
    let token = issue_token(&student(), SECRET, 3600).unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    c.bench_function("extract_credential", |b| {
        b.iter(|| extract_credential(black_box(&headers)))
    });

    c.bench_function("authenticate", |b| {
        b.iter(|| authenticate(black_box(&headers), SECRET))
    });
}

fn bench_fixture_login(c: &mut Criterion) {
    let directory = UserDirectory::with_demo_accounts().unwrap();

    c.bench_function("fixture_login", |b| {
        b.iter(|| directory.login(black_box("student"), black_box("123"), Role::Student))
    });

    c.bench_function("fixture_lookup", |b| {
        b.iter(|| directory.get(black_box("student")))
    });
}

criterion_group!(
    benches,
    bench_token_issue,
    bench_token_verify,
    bench_gateway,
    bench_fixture_login
);
criterion_main!(benches);
