//! Offline sample data shipped with the binary.
//!
//! Each entry is `(key, value)`: the example input a user might paste and the
//! canned answer returned for it. Order matters, earlier entries win ties.

/// Buggy snippets and their corrected versions.
pub const DEBUGGER_SAMPLES: &[(&str, &str)] = &[
    (
        "print(Hello World)",
        "**Bug Found:**\nMissing double quotes around the string.\n\n**Corrected Code:**\n```python\nprint(\"Hello World\")\n```\n\n**Explanation:** Strings in Python must be enclosed in double quotes `\"` or single quotes `'`. Without them, Python thinks you are referring to variables named `Hello` and `World`.",
    ),
    (
        "print(Hello)",
        "**Bug Found:**\nMissing double quotes around the string.\n\n**Corrected Code:**\n```python\nprint(\"Hello\")\n```\n\n**Explanation:** Strings must be enclosed in quotes. Python treats `Hello` as an undefined variable name.",
    ),
    (
        "a = 5\nb = 10\na = b\nb = a\nprint(a, b)",
        "**Bug Found:**\nIncorrect swapping logic. `a = b` overwrites the initial value of `a`, losing it forever.\n\n**Corrected Code:**\n```python\na = 5\nb = 10\ntemp = a\na = b\nb = temp\nprint(a, b)\n# Or Pythonic way: a, b = b, a\n```\n\n**Explanation:** Use a temporary variable to hold the value of `a` before it gets overwritten.",
    ),
    (
        "def say_hello()\nprint('Hello World')\nsay_hello",
        "**Bugs Found:**\n1. Missing colon after function definition.\n2. Missing indentation for the function body.\n3. Missing parentheses when calling the function.\n\n**Corrected Code:**\n```python\ndef say_hello():\n    print('Hello World')\n\nsay_hello()\n```\n\n**Explanation:** Functions need a colon and indented body. To execute a function, you must use parentheses `()`.",
    ),
    (
        "num1 = input('Enter first number: ')\nnum2 = input('Enter second number: ')\nsum = num1 + num2\nprint('The sum is ' + sum)",
        "**Bugs Found:**\n1. `input()` returns a string, so `num1 + num2` performs string concatenation instead of addition.\n2. Cannot concatenate a string with a numeric sum (if it were converted) without casting.\n\n**Corrected Code:**\n```python\nnum1 = int(input('Enter first number: '))\nnum2 = int(input('Enter second number: '))\nsum_val = num1 + num2\nprint(f'The sum is {sum_val}')\n```\n\n**Explanation:** Use `int()` or `float()` to convert input strings to numbers for math operations. Use f-strings for easy printing.",
    ),
    (
        "a = 5\nb = 10\nprint(f'Before: a={a}, b={b}')\na = b\nb = a\nprint(f'After: a={a}, b={b}')",
        "**Bug Found:**\nLogic error in swapping. `a = b` overwrites the original value of `a`, so `b = a` just sets `b` to its own value.\n\n**Corrected Code:**\n```python\na = 5\nb = 10\nprint(f'Before: a={a}, b={b}')\n\n# Method 1: Temporary variable\ntemp = a\na = b\nb = temp\n\n# Method 2: Pythonic way\n# a, b = b, a\n\nprint(f'After: a={a}, b={b}')\n```\n\n**Explanation:** You need a temporary variable to hold one value during the swap, or use Python's tuple unpacking: `a, b = b, a`.",
    ),
    (
        "radius = 7\npi = 3.14\narea = pi * radius ^ 2\nprint('Area is: ' + area)",
        "**Bugs Found:**\n1. In Python, `^` is the Bitwise XOR operator, not exponentiation.\n2. Cannot concatenate string and float in `print`.\n\n**Corrected Code:**\n```python\nradius = 7\npi = 3.14\narea = pi * (radius ** 2)\nprint(f'Area is: {area}')\n```\n\n**Explanation:** Use `**` for exponentiation (powers). Use f-strings to include variables in print statements.",
    ),
    (
        "def check_even(n):\nif n % 2 = 0:\nreturn True\nelse:\nreturn False",
        "**Bugs Found:**\n1. Incorrect indentation for `if/else` block.\n2. Using assignment (`=`) instead of comparison (`==`) in the condition.\n\n**Corrected Code:**\n```python\ndef check_even(n):\n    if n % 2 == 0:\n        return True\n    else:\n        return False\n```\n\n**Explanation:** Always use `==` for equality checks. Indentation is mandatory in Python to define code blocks.",
    ),
    (
        "price = 100\ndiscount = 0.2\ntotal = price - price * discount\nif total < 50\nprint('Cheap!')\nelse\nprint('Expensive!')",
        "**Bugs Found:**\n1. Missing colons after `if` and `else` statements.\n2. Missing indentation for the print statements.\n\n**Corrected Code:**\n```python\nprice = 100\ndiscount = 0.2\ntotal = price - (price * discount)\nif total < 50:\n    print('Cheap!')\nelse:\n    print('Expensive!')\n```\n\n**Explanation:** Every `if` and `else` statement must end with a colon, and the following block must be indented.",
    ),
    (
        "count = 0\nwhile count < 5\nprint('Counting: ' + count)\ncount = count + 1",
        "**Bugs Found:**\n1. Missing colon after `while` condition.\n2. Print statement and count increment are not indented.\n3. Type error: Cannot add string and integer.\n\n**Corrected Code:**\n```python\ncount = 0\nwhile count < 5:\n    print(f'Counting: {count}')\n    count += 1\n```\n\n**Explanation:** Indentation defines the loop body. Use `count += 1` for brevity and f-strings for printing variables.",
    ),
    (
        "def get_average(list):\nsum = 0\nfor x in list:\nsum = sum + x\nreturn sum / len(list)",
        "**Bugs Found:**\n1. Missing indentation for the function body and loop body.\n2. Potential `ZeroDivisionError` if the list is empty.\n\n**Corrected Code:**\n```python\ndef get_average(numbers):\n    if not numbers:\n        return 0\n    total = 0\n    for x in numbers:\n        total += x\n    return total / len(numbers)\n```\n\n**Explanation:** Indent properly to show nested structure. Always check for empty lists before dividing by `len()`.",
    ),
    (
        "items = ['apple', 'banana', 'cherry']\nfor i in range(len(items))\nprint('Item ' + i + ' is ' + items[i])",
        "**Bugs Found:**\n1. Missing colon in `for` loop.\n2. Missing indentation for `print`.\n3. Type error: `i` is an integer, cannot be added directly to strings.\n\n**Corrected Code:**\n```python\nitems = ['apple', 'banana', 'cherry']\nfor i in range(len(items)):\n    print(f'Item {i} is {items[i]}')\n```\n\n**Explanation:** In Python, you can't add `str + int`. Use f-strings or `str(i)` to convert the number.",
    ),
    (
        "p = 1000\nr = 5\nt = 2\nsi = p * r * t / 100\nprint('Simple Interest is: ' + si)",
        "**Bugs Found:**\n1. Potential type error if `si` is used in string concatenation without conversion.\n2. Clarification: Ensure variables are descriptive.\n\n**Corrected Code:**\n```python\nprincipal = 1000\nrate = 5\ntime = 2\nsimple_interest = (principal * rate * time) / 100\nprint(f'Simple Interest is: {simple_interest}')\n```\n\n**Explanation:** Using descriptive names makes code readable. Use f-strings to avoid `TypeError` when printing numbers with text.",
    ),
    (
        "#include <stdio.h>\nmain() {\n    printf(\"Hello World\")\n}",
        "**Bugs Found:**\n1. Missing return type for `main()` (standard C requires `int`).\n2. Missing semicolon at the end of the `printf` statement.\n\n**Corrected Code:**\n```c\n#include <stdio.h>\nint main() {\n    printf(\"Hello World\");\n    return 0;\n}\n```\n\n**Explanation:** In C, every statement must end with a semicolon. The `main` function should return an integer status code to the operating system.",
    ),
    (
        "#include <stdio.h>\nint main() {\n    int x;\n    printf(\"Value of x: %d\", x);\n    return 0;\n}",
        "**Bug Found:**\nUsing an uninitialized variable `x`. In C, uninitialized local variables contain \"garbage values\" (random memory content).\n\n**Corrected Code:**\n```c\n#include <stdio.h>\nint main() {\n    int x = 0; // Initialize variable\n    printf(\"Value of x: %d\", x);\n    return 0;\n}\n```\n\n**Explanation:** Always initialize variables before using them to ensure predictable behavior.",
    ),
    (
        "#include <stdio.h>\nint main() {\n    int *ptr = NULL;\n    *ptr = 10;\n    return 0;\n}",
        "**Bug Found:**\nDereferencing a NULL pointer. This will cause a Segmentation Fault (crash).\n\n**Corrected Code:**\n```c\n#include <stdio.h>\nint main() {\n    int val = 0;\n    int *ptr = &val; // Point to a valid memory location\n    *ptr = 10;\n    printf(\"Value: %d\", val);\n    return 0;\n}\n```\n\n**Explanation:** A pointer must point to a valid memory address before you can assign a value to it via dereferencing (`*`).",
    ),
    (
        "#include <iostream>\nint main() {\n    cout << \"Hello C++\" << endl;\n    return 0;\n}",
        "**Bug Found:**\n`cout` and `endl` are not defined in the global namespace. They are part of the `std` namespace.\n\n**Corrected Code:**\n```cpp\n#include <iostream>\nusing namespace std;\n\nint main() {\n    cout << \"Hello C++\" << endl;\n    return 0;\n}\n// OR use std:: prefix\n// std::cout << \"Hello C++\" << std::endl;\n```\n\n**Explanation:** Standard library components in C++ are inside the `std` namespace. You must either use `std::` or include `using namespace std;`.",
    ),
    (
        "#include <iostream>\n#include <vector>\nint main() {\n    std::vector<int> v = {1, 2};\n    std::cout << v[5];\n    return 0;\n}",
        "**Bug Found:**\nIndex out of bounds. Accessing index 5 in a vector of size 2.\n\n**Corrected Code:**\n```cpp\n#include <iostream>\n#include <vector>\nint main() {\n    std::vector<int> v = {1, 2};\n    if (v.size() > 5) {\n        std::cout << v[5];\n    } else {\n        std::cout << \"Index out of range\" << std::endl;\n    }\n    return 0;\n}\n```\n\n**Explanation:** Always check the size of a container before accessing an index, or use `.at()` which provides range checking.",
    ),
    (
        "class Box {\n    int width;\n    Box() { width = 10 }\n};",
        "**Bugs Found:**\n1. Members and constructor are private by default in a class.\n2. Missing semicolon after statement in constructor.\n\n**Corrected Code:**\n```cpp\nclass Box {\npublic: // Make members public\n    int width;\n    Box() : width(10) {} // Use initializer list\n};\n```\n\n**Explanation:** Use the `public:` keyword to make members accessible. Member initializer lists (`: width(10)`) are preferred in C++.",
    ),
    (
        "<div>\n    <h1>Welcome\n    <p>This is a paragraph.\n</div>",
        "**Bugs Found:**\n1. Missing closing tag for `<h1>`.\n2. Missing closing tag for `<p>`.\n\n**Corrected Code:**\n```html\n<div>\n    <h1>Welcome</h1>\n    <p>This is a paragraph.</p>\n</div>\n```\n\n**Explanation:** Every opening tag should have a corresponding closing tag to ensure proper rendering and DOM structure.",
    ),
    (
        "<img src=\"logo.png\">\n<a href=\"google.com\">Search</a>",
        "**Improvement Found:**\nWhile not strictly \"bugs,\" missing ALT text for images and missing protocols for absolute links are bad practices.\n\n**Corrected Code:**\n```html\n<img src=\"logo.png\" alt=\"App Logo\">\n<a href=\"https://google.com\">Search</a>\n```\n\n**Explanation:** Add `alt` attributes for accessibility. Use full URLs (including `https://`) for external links.",
    ),
    (
        "<ul>\n    <div>Item 1</div>\n    <li>Item 2</li>\n</ul>",
        "**Bug Found:**\nIncorrect nesting. A `<ul>` or `<ol>` should only contain `<li>` elements as direct children.\n\n**Corrected Code:**\n```html\n<ul>\n    <li>Item 1</li>\n    <li>Item 2</li>\n</ul>\n```\n\n**Explanation:** To maintain valid HTML5 structure, strictly use list item tags (`<li>`) inside list containers.",
    ),
    (
        "System.out.println(Hello World);",
        "**Bug Found:**\nMissing double quotes around the string in Java.\n\n**Corrected Code:**\n```java\nSystem.out.println(\"Hello World\");\n```\n\n**Explanation:** Java requires double quotes `\"` for string literals.",
    ),
    (
        "int a = 5; int b = 10; a = b; b = a;",
        "**Bug Found:**\nLogic error in swapping (Java/C++). `a` loses its original value.\n\n**Corrected Code:**\n```java\nint temp = a;\na = b;\nb = temp;\n```\n\n**Explanation:** You need a temporary variable to perform a swap correctly in Java/C++.",
    ),
    (
        "#include <stdio.h>\nmain() { printf(Hello World); }",
        "**Bug Found:**\nMissing double quotes in `printf` and missing return type.\n\n**Corrected Code:**\n```c\n#include <stdio.h>\nint main() {\n    printf(\"Hello World\");\n    return 0;\n}\n```\n\n**Explanation:** In C, strings must be in double quotes. Also, standard `main` should return `int`.",
    ),
];

/// Verbose snippets and their simplified rewrites.
pub const SIMPLIFIER_SAMPLES: &[(&str, &str)] = &[
    (
        "int temp = a;\na = b;\nb = temp;",
        "**Simplified Code (C++):**\n```cpp\nstd::swap(a, b);\n```\n\n**Improvements:**\n- Uses standard library function\n- Clearer intent\n- Optimized by compiler",
    ),
    (
        "temp = x\nx = y\ny = temp",
        "**Simplified Code (Python):**\n```python\nx, y = y, x\n```\n\n**Improvements:**\n- Pythonic tuple unpacking\n- More concise\n- No temporary variable",
    ),
    (
        "System.out.println(\"Hello\");\nSystem.out.println(\"World\");",
        "**Simplified Code:**\n```java\nSystem.out.println(\"Hello World\");\n```\n\n**Improvements:**\n- Combined I/O operations\n- Reduced overhead",
    ),
    (
        "x = 0\nfor i in range(len(arr)):\n    x = x + arr[i]",
        "**Simplified Code:**\n```python\nx = sum(arr)\n```\n\n**Improvements:**\n- Used built-in sum() function\n- More readable and Pythonic\n- Faster execution",
    ),
    (
        "if x > 5:\n    return True\nelse:\n    return False",
        "**Simplified Code:**\n```python\nreturn x > 5\n```\n\n**Improvements:**\n- Direct boolean return\n- Eliminates unnecessary if-else\n- More concise",
    ),
    (
        "result = []\nfor item in items:\n    result.append(item * 2)",
        "**Simplified Code:**\n```python\nresult = [item * 2 for item in items]\n```\n\n**Improvements:**\n- List comprehension is more Pythonic\n- Single line instead of three\n- Better performance",
    ),
    (
        "temp = a\na = b\nb = temp",
        "**Simplified Code:**\n```python\na, b = b, a\n```\n\n**Improvements:**\n- Python's tuple unpacking\n- No temporary variable needed\n- More elegant",
    ),
    (
        "if len(my_list) == 0:\n    print('Empty')",
        "**Simplified Code:**\n```python\nif not my_list:\n    print('Empty')\n```\n\n**Improvements:**\n- More Pythonic\n- Empty lists are falsy\n- Cleaner syntax",
    ),
    (
        "if (a > b) {\n    max = a;\n} else {\n    max = b;\n}",
        "**Simplified Code:**\n```c\nmax = (a > b) ? a : b;\n```\n\n**Improvements:**\n- Uses ternary operator\n- Single line instead of five\n- Common professional pattern",
    ),
    (
        "for (int i = 0; i < vec.size(); i++) {\n    std::cout << vec[i] << std::endl;\n}",
        "**Simplified Code:**\n```cpp\nfor (const auto& item : vec) {\n    std::cout << item << std::endl;\n}\n```\n\n**Improvements:**\n- Range-based for loop (C++11+)\n- No manual index management\n- Cleaner and safer syntax",
    ),
    (
        "<div id=\"header\">\n    <div class=\"nav-links\">\n        <div class=\"link\">Home</div>\n    </div>\n</div>",
        "**Simplified Code:**\n```html\n<header>\n    <nav>\n        <ul><li>Home</li></ul>\n    </nav>\n</header>\n```\n\n**Improvements:**\n- Uses semantic HTML5 tags\n- Better for SEO and Accessibility\n- Much cleaner structure",
    ),
];

/// Snippets with an AI-vs-human authorship verdict.
pub const CHECKER_SAMPLES: &[(&str, &str)] = &[
    (
        "print(\"Hello World\")",
        "**Analysis:** Likely HUMAN-WRITTEN (95% confidence)\n\n**Reasoning:**\n- Extremely basic standard example\n- No comments or docstrings\n- Universal first program\n\n**Indicators:** `Hello World` is the most common code snippet written by humans learning a language.",
    ),
    (
        "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello World\");\n    }\n}",
        "**Analysis:** Likely HUMAN-WRITTEN (90% confidence)\n\n**Reasoning:**\n- Standard Java boilerplate\n- Typical formatting for tutorials\n\n**Indicators:** Humans often memorize this exact structure.",
    ),
    (
        "a, b = b, a",
        "**Analysis:** Likely HUMAN-WRITTEN (80% confidence)\n\n**Reasoning:**\n- Idiomatic Python usage\n- Very concise\n- Common interview/learning snippet\n\n**Indicators:** Experienced Python developers use this pattern frequently.",
    ),
    (
        "temp = a; a = b; b = temp;",
        "**Analysis:** Likely HUMAN-WRITTEN (85% confidence)\n\n**Reasoning:**\n- Classic imperative swap logic\n- Used in almost every intro CS class for C/C++/Java\n\n**Indicators:** This is the foundational way humans learn variable manipulation.",
    ),
    (
        "def calculate_sum(numbers):\n    total = 0\n    for num in numbers:\n        total += num\n    return total",
        "**Analysis:** Likely HUMAN-WRITTEN (85% confidence)\n\n**Reasoning:**\n- Uses verbose loop instead of built-in sum()\n- Variable naming is clear but basic\n- Traditional imperative style\n- Common beginner pattern\n\n**Indicators:** Human developers often write explicit loops when learning.",
    ),
    (
        "def fibonacci(n: int) -> int:\n    \"\"\"Calculate nth Fibonacci number using memoization.\"\"\"\n    memo = {0: 0, 1: 1}\n    def fib(x):\n        if x not in memo:\n            memo[x] = fib(x-1) + fib(x-2)\n        return memo[x]\n    return fib(n)",
        "**Analysis:** Likely AI-GENERATED (75% confidence)\n\n**Reasoning:**\n- Type hints present\n- Comprehensive docstring\n- Optimal algorithm choice (memoization)\n- Clean nested function structure\n\n**Indicators:** AI tends to include type hints and docstrings consistently.",
    ),
    (
        "x=5\ny=10\nz=x+y\nprint(z)",
        "**Analysis:** Likely HUMAN-WRITTEN (90% confidence)\n\n**Reasoning:**\n- No spaces around operators\n- Very basic logic\n- No comments or documentation\n- Beginner-level code\n\n**Indicators:** Inconsistent spacing is common in human-written code.",
    ),
    (
        "#include <stdlib.h>\nint main() {\n    int *a = malloc(10 * sizeof(int));\n    // process a\n    free(a);\n    return 0;\n}",
        "**Analysis:** Likely AI-GENERATED (70% confidence)\n\n**Reasoning:**\n- Correct `sizeof` usage\n- Includes `free()` consistently\n- Clean minimal structure\n- No manual byte counting\n\n**Indicators:** AI is very reliable with basic C allocation patterns.",
    ),
    (
        "void process() {\n    int* data = new int[100];\n    for(int i=0; i<100; i++) data[i] = i;\n    delete[] data;\n}",
        "**Analysis:** Likely HUMAN-WRITTEN (80% confidence)\n\n**Reasoning:**\n- Manual memory management (raw pointers)\n- No exception safety\n- Missing `std::` prefixes\n- Traditional school-style code\n\n**Indicators:** Humans often use raw 'new'/'delete' in learning exercises.",
    ),
    (
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <title>AI Generated Page</title>\n</head>\n<body>\n    <main>\n        <section>\n            <h2>Perfect Content</h2>\n        </section>\n    </main>\n</body>\n</html>",
        "**Analysis:** Likely AI-GENERATED (85% confidence)\n\n**Reasoning:**\n- Perfect indentation\n- All essential meta tags present\n- Semantic hierarchy (`main` > `section` > `h2`)\n- Standard doc type declaration\n\n**Indicators:** AI consistently generates boilerplate-perfect HTML.",
    ),
];
