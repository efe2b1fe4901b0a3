use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Blank,
    Basic,
    Calculator,
}

impl TemplateId {
    pub fn all() -> &'static [TemplateId] {
        &[Self::Blank, Self::Basic, Self::Calculator]
    }

    pub fn template(&self) -> &'static Template {
        match self {
            Self::Blank => &BLANK,
            Self::Basic => &BASIC,
            Self::Calculator => &CALCULATOR,
        }
    }
}

/// A fixed starting point for the three buffers.
#[derive(Debug, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub display_name: &'static str,
    pub markup: &'static str,
    pub styles: &'static str,
    pub script: &'static str,
}

static BLANK: Template = Template {
    id: TemplateId::Blank,
    display_name: "Blank",
    markup: "",
    styles: "",
    script: "",
};

static BASIC: Template = Template {
    id: TemplateId::Basic,
    display_name: "Basic Example",
    markup: r#"<div class="container">
  <h1>Hello World!</h1>
  <p>This is a basic example.</p>
  <button onclick="changeColor()">Change Color</button>
</div>"#,
    styles: r#".container {
  max-width: 600px;
  margin: 50px auto;
  padding: 20px;
  text-align: center;
  font-family: Arial, sans-serif;
  background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
  border-radius: 10px;
  color: white;
}

button {
  background: #ff6b6b;
  color: white;
  border: none;
  padding: 10px 20px;
  border-radius: 5px;
  cursor: pointer;
  font-size: 16px;
  margin-top: 20px;
}

button:hover {
  background: #ee5a5a;
}"#,
    script: r#"function changeColor() {
  const container = document.querySelector('.container');
  const colors = [
    'linear-gradient(135deg, #667eea 0%, #764ba2 100%)',
    'linear-gradient(135deg, #f093fb 0%, #f5576c 100%)',
    'linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)',
    'linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)'
  ];

  const currentBg = container.style.background;
  let nextColor = colors[0];

  for (let i = 0; i < colors.length; i++) {
    if (currentBg === colors[i]) {
      nextColor = colors[(i + 1) % colors.length];
      break;
    }
  }

  container.style.background = nextColor;
}"#,
};

// The calculator evaluates the display with `eval`. That is template content
// running inside the sandboxed frame and is left as-is.
static CALCULATOR: Template = Template {
    id: TemplateId::Calculator,
    display_name: "Calculator",
    markup: r#"<div class="calculator">
  <div class="display">
    <input type="text" id="display" readonly>
  </div>
  <div class="buttons">
    <button onclick="clearDisplay()" class="clear">C</button>
    <button onclick="deleteLast()" class="delete">&#9003;</button>
    <button onclick="appendToDisplay('/')" class="operator">&divide;</button>
    <button onclick="appendToDisplay('*')" class="operator">&times;</button>

    <button onclick="appendToDisplay('7')">7</button>
    <button onclick="appendToDisplay('8')">8</button>
    <button onclick="appendToDisplay('9')">9</button>
    <button onclick="appendToDisplay('-')" class="operator">&minus;</button>

    <button onclick="appendToDisplay('4')">4</button>
    <button onclick="appendToDisplay('5')">5</button>
    <button onclick="appendToDisplay('6')">6</button>
    <button onclick="appendToDisplay('+')" class="operator">+</button>

    <button onclick="appendToDisplay('1')">1</button>
    <button onclick="appendToDisplay('2')">2</button>
    <button onclick="appendToDisplay('3')">3</button>
    <button onclick="calculate()" class="equals">=</button>

    <button onclick="appendToDisplay('0')" class="zero">0</button>
    <button onclick="appendToDisplay('.')">.</button>
  </div>
</div>"#,
    styles: r#".calculator {
  max-width: 300px;
  margin: 50px auto;
  background: #2c3e50;
  border-radius: 15px;
  padding: 20px;
  box-shadow: 0 10px 25px rgba(0,0,0,0.3);
}

.display {
  margin-bottom: 15px;
}

#display {
  width: 100%;
  height: 60px;
  font-size: 24px;
  text-align: right;
  background: #34495e;
  color: white;
  border: none;
  border-radius: 10px;
  padding: 0 15px;
  box-sizing: border-box;
}

.buttons {
  display: grid;
  grid-template-columns: repeat(4, 1fr);
  gap: 10px;
}

button {
  height: 50px;
  border: none;
  border-radius: 10px;
  font-size: 18px;
  font-weight: bold;
  cursor: pointer;
  transition: all 0.2s;
}

button:hover {
  transform: translateY(-2px);
  box-shadow: 0 5px 10px rgba(0,0,0,0.2);
}

button:active {
  transform: translateY(0);
}

button:not(.operator):not(.equals):not(.clear):not(.delete) {
  background: #95a5a6;
  color: #2c3e50;
}

.operator {
  background: #e67e22;
  color: white;
}

.equals {
  background: #27ae60;
  color: white;
  grid-row: span 2;
}

.clear {
  background: #e74c3c;
  color: white;
}

.delete {
  background: #f39c12;
  color: white;
}

.zero {
  grid-column: span 2;
}"#,
    script: r#"let display = document.getElementById('display');

function appendToDisplay(value) {
  if (display.value === '0' && value !== '.') {
    display.value = value;
  } else {
    display.value += value;
  }
}

function clearDisplay() {
  display.value = '';
}

function deleteLast() {
  display.value = display.value.slice(0, -1);
}

function calculate() {
  try {
    let result = eval(display.value);
    display.value = result;
  } catch (error) {
    display.value = 'Error';
    setTimeout(() => {
      clearDisplay();
    }, 1500);
  }
}"#,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_lowercase() {
        let names = ["blank", "basic", "calculator"];
        for (id, name) in TemplateId::all().iter().zip(names) {
            assert_eq!(serde_json::to_string(id).unwrap(), format!("\"{}\"", name));
            assert_eq!(id.template().id, *id);
        }
        assert!(serde_json::from_str::<TemplateId>("\"missing\"").is_err());
    }

    #[test]
    fn test_blank_is_empty() {
        let t = TemplateId::Blank.template();
        assert!(t.markup.is_empty() && t.styles.is_empty() && t.script.is_empty());
    }

    #[test]
    fn test_calculator_content() {
        let t = TemplateId::Calculator.template();
        assert_eq!(t.display_name, "Calculator");
        assert!(t.markup.contains("id=\"display\""));
        assert!(t.styles.contains(".calculator"));
        assert!(t.script.contains("function calculate()"));
    }

    #[test]
    fn test_serialization_uses_identifier() {
        assert_eq!(serde_json::to_string(&TemplateId::Calculator).unwrap(), "\"calculator\"");
    }
}
