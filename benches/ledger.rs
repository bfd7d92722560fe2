use {
    bigdecimal::BigDecimal,
    criterion::{Criterion, criterion_group, criterion_main},
    std::{hint::black_box, str::FromStr, sync::Arc, thread},
    wallet_ledger::{
        ledger::{Ledger, account::Account},
        models::{AccountId, TransactionInstruction},
        transaction_processor::{TransactionProcessor, interface::TransactionProcessorInterface},
    },
};

const FUNDS: &str = "3.14159265358979323846264338327950288419716939937510";

fn contended_account(c: &mut Criterion) {
    let funds = BigDecimal::from_str(FUNDS).unwrap();

    c.bench_function("account credit/debit, 4 threads", |b| {
        b.iter(|| {
            let account = Account::new();
            account.credit(&(&funds * BigDecimal::from(1_000))).unwrap();
            thread::scope(|s| {
                for _ in 0..2 {
                    s.spawn(|| {
                        for _ in 0..250 {
                            account.credit(&funds).unwrap();
                        }
                    });
                    s.spawn(|| {
                        for _ in 0..250 {
                            account.debit(&funds).unwrap();
                        }
                    });
                }
            });
            black_box(account.read().unwrap())
        })
    });
}

fn register_transactions(c: &mut Criterion) {
    let processor = TransactionProcessor::new(Arc::new(Ledger::default()));
    for id in 1..=8 {
        processor.register_account(id).unwrap();
    }

    let mut next_account = 0;
    c.bench_function("register credit transaction", |b| {
        b.iter(|| {
            next_account = next_account % 8 + 1;
            let instruction = TransactionInstruction {
                account_id: AccountId(next_account),
                transaction_type: "CREDIT".to_string(),
                funds: FUNDS.to_string(),
                external_transaction_id: "bench".to_string(),
            };
            black_box(processor.register_transaction(instruction).unwrap())
        })
    });
}

criterion_group!(benches, contended_account, register_transactions);
criterion_main!(benches);
