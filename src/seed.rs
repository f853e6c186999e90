// src/seed.rs

use rand::Rng;

use crate::models::{bilet::NewBilet, question::NewQuestion, topic::NewTopic};
use crate::storage::Storage;

/// Seeds the in-memory store once at process start: four topics, ten
/// bilets with twenty questions each, every question assigned a random
/// topic and a random correct-answer index. Skipped when data already
/// exists (e.g., a file-backed database during local experiments).
pub async fn seed_sample_data(storage: &Storage) -> Result<(), sqlx::Error> {
    if !storage.get_bilets(1).await?.is_empty() {
        tracing::info!("Sample data already present, skipping seed.");
        return Ok(());
    }

    let mut rng = rand::rng();

    let topics = [
        NewTopic {
            name: "Road Signs".to_string(),
            name_uz: "Yo'l belgilari".to_string(),
            name_ru: "Дорожные знаки".to_string(),
            name_uzc: "Йўл белгилари".to_string(),
            description: Some("Traffic signs and their meanings".to_string()),
            description_uz: Some("Yo'l belgilari va ularning ma'nolari".to_string()),
            description_ru: Some("Дорожные знаки и их значения".to_string()),
            description_uzc: Some("Йўл белгилари ва уларнинг маънолари".to_string()),
            question_count: 15,
        },
        NewTopic {
            name: "Traffic Rules".to_string(),
            name_uz: "Yo'l qoidalari".to_string(),
            name_ru: "Правила дорожного движения".to_string(),
            name_uzc: "Йўл қоидалари".to_string(),
            description: Some("Basic traffic regulations".to_string()),
            description_uz: Some("Asosiy yo'l harakat qoidalari".to_string()),
            description_ru: Some("Основные правила дорожного движения".to_string()),
            description_uzc: Some("Асосий йўл ҳаракат қоидалари".to_string()),
            question_count: 25,
        },
        NewTopic {
            name: "Vehicle Safety".to_string(),
            name_uz: "Transport vositasi xavfsizligi".to_string(),
            name_ru: "Безопасность транспортного средства".to_string(),
            name_uzc: "Транспорт воситаси хавфсизлиги".to_string(),
            description: Some("Safety procedures and checks".to_string()),
            description_uz: Some("Xavfsizlik tartib-qoidalari va tekshiruvlari".to_string()),
            description_ru: Some("Процедуры безопасности и проверки".to_string()),
            description_uzc: Some("Хавфсизлик тартиб-қоидалари ва текширувлари".to_string()),
            question_count: 12,
        },
        NewTopic {
            name: "Emergency Situations".to_string(),
            name_uz: "Favqulodda vaziyatlar".to_string(),
            name_ru: "Чрезвычайные ситуации".to_string(),
            name_uzc: "Фавқулодда вазиятлар".to_string(),
            description: Some("Handling emergencies on the road".to_string()),
            description_uz: Some("Yo'lda favqulodda vaziyatlarni hal qilish".to_string()),
            description_ru: Some("Решение чрезвычайных ситуаций на дороге".to_string()),
            description_uzc: Some("Йўлда фавқулодда вазиятларни ҳал қилиш".to_string()),
            question_count: 8,
        },
    ];

    let mut topic_ids = Vec::with_capacity(topics.len());
    for topic in topics {
        let created = storage.create_topic(topic).await?;
        topic_ids.push(created.id);
    }

    for number in 1..=10_i64 {
        let bilet = storage
            .create_bilet(NewBilet {
                number,
                title: format!("Bilet {}", number),
                title_uz: format!("Bilet {}", number),
                title_ru: format!("Билет {}", number),
                title_uzc: format!("Билет {}", number),
                description: Some("Standard test bilet with 20 questions".to_string()),
                description_uz: Some("20 ta savoldan iborat standart test bileti".to_string()),
                description_ru: Some("Стандартный тестовый билет с 20 вопросами".to_string()),
                description_uzc: Some("20 та саволдан иборат стандарт тест билети".to_string()),
                question_count: 20,
            })
            .await?;

        for position in 1..=20_i64 {
            let topic_id = topic_ids[rng.random_range(0..topic_ids.len())].clone();

            storage
                .create_question(NewQuestion {
                    bilet_id: Some(bilet.id.clone()),
                    topic_id: Some(topic_id),
                    position,
                    question_text: format!(
                        "What is the correct action in this driving scenario {}?",
                        position
                    ),
                    question_text_uz: format!(
                        "Ushbu haydash stsenariysi {}da to'g'ri harakat nima?",
                        position
                    ),
                    question_text_ru: format!(
                        "Какое правильное действие в данном сценарии вождения {}?",
                        position
                    ),
                    question_text_uzc: format!(
                        "Ушбу ҳайдаш стсенарийси {}да тўғри ҳаракат нима?",
                        position
                    ),
                    options: vec![
                        "Stop completely and wait".to_string(),
                        "Proceed with caution".to_string(),
                        "Yield to other traffic".to_string(),
                        "Continue at normal speed".to_string(),
                    ],
                    options_uz: vec![
                        "To'liq to'xtab kuting".to_string(),
                        "Ehtiyotkorlik bilan davom eting".to_string(),
                        "Boshqa transport vositalariga yo'l bering".to_string(),
                        "Oddiy tezlikda davom eting".to_string(),
                    ],
                    options_ru: vec![
                        "Полностью остановиться и ждать".to_string(),
                        "Продолжить с осторожностью".to_string(),
                        "Уступить дорогу другому транспорту".to_string(),
                        "Продолжить с обычной скоростью".to_string(),
                    ],
                    options_uzc: vec![
                        "Тўлиқ тўхтаб кутинг".to_string(),
                        "Эҳтиёткорлик билан давом етинг".to_string(),
                        "Бошқа транспорт воситаларига йўл беринг".to_string(),
                        "Оддий тезликда давом етинг".to_string(),
                    ],
                    correct_answer: rng.random_range(0..4),
                    explanation: Some(
                        "This is the correct answer based on traffic regulations.".to_string(),
                    ),
                    explanation_uz: Some(
                        "Bu yo'l harakat qoidalariga asoslangan to'g'ri javob.".to_string(),
                    ),
                    explanation_ru: Some(
                        "Это правильный ответ, основанный на правилах дорожного движения."
                            .to_string(),
                    ),
                    explanation_uzc: Some(
                        "Бу йўл ҳаракат қоидаларига асосланган тўғри жавоб.".to_string(),
                    ),
                    image_url: None,
                })
                .await?;
        }
    }

    tracing::info!("Seeded sample data: 4 topics, 10 bilets, 200 questions.");
    Ok(())
}
