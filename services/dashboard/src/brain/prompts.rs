//! Prompt templates and operator-facing AI messages

use crate::i18n::Language;

pub fn market_analysis_prompt(lang: Language, topic: &str) -> String {
    match lang {
        Language::Vi => format!(
            "Phân tích thị trường crypto hiện tại về chủ đề sau: \"{topic}\". \n      \
             Tập trung vào các xu hướng gần đây, tin tức quan trọng và tâm lý thị trường. \n      \
             Cung cấp một bản tóm tắt ngắn gọn, dễ hiểu cho một nhà giao dịch.\n      \
             Sử dụng ngôn ngữ Tiếng Việt."
        ),
        Language::En => format!(
            "Analyze the current crypto market on the following topic: \"{topic}\". \n      \
             Focus on recent trends, important news, and market sentiment. \n      \
             Provide a concise, easy-to-understand summary for a trader.\n      \
             Use English language."
        ),
    }
}

pub fn advisor_system_instruction(lang: Language) -> &'static str {
    match lang {
        Language::Vi => "Bạn là AI Brain, hệ thống ra quyết định cho một dàn bot giao dịch crypto. Mục tiêu của bạn là cung cấp lời khuyên chiến lược cho người vận hành. Phân tích câu hỏi của họ dựa trên điều kiện thị trường, hiệu suất bot và các nguyên tắc quản lý rủi ro. Giữ câu trả lời của bạn ngắn gọn, có thể hành động và dựa trên dữ liệu. Giọng điệu của bạn phải chuyên nghiệp và tự tin.",
        Language::En => "You are the AI Brain for a sophisticated crypto trading bot system. Your goal is to provide strategic advice to the human operator. Analyze their questions based on market conditions, bot performance, and risk management principles. Keep your answers concise, actionable, and data-driven. Your tone should be professional and confident.",
    }
}

pub fn not_configured_message(lang: Language) -> &'static str {
    match lang {
        Language::Vi => "Lỗi: API key cho Gemini chưa được cấu hình. Vui lòng kiểm tra lại.",
        Language::En => "Error: API key for Gemini is not configured. Please check.",
    }
}

pub fn call_failed_message(lang: Language, detail: &str) -> String {
    match lang {
        Language::Vi => format!("Đã xảy ra lỗi khi gọi Gemini API: {}", detail),
        Language::En => format!("An error occurred while calling the Gemini API: {}", detail),
    }
}

/// Used when a failure carries no message of its own
pub fn unknown_failure_message(lang: Language) -> &'static str {
    match lang {
        Language::Vi => "Đã xảy ra lỗi không xác định khi gọi Gemini API.",
        Language::En => "An unknown error occurred while calling the Gemini API.",
    }
}
